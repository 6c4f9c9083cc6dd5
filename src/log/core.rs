//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Oxchain.
//! The Oxchain project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use crate::log::config::OxCLogConfig;
use crate::log::handlers::{OxCFileHandler, OxLogHandler, OxCStderrHandler};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OxCLogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl OxCLogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OxCLogLevel::Trace => "TRACE",
            OxCLogLevel::Debug => "DEBUG",
            OxCLogLevel::Info => "INFO",
            OxCLogLevel::Warning => "WARNING",
            OxCLogLevel::Error => "ERROR",
        }
    }
}

impl From<log::Level> for OxCLogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => OxCLogLevel::Trace,
            log::Level::Debug => OxCLogLevel::Debug,
            log::Level::Info => OxCLogLevel::Info,
            log::Level::Warn => OxCLogLevel::Warning,
            log::Level::Error => OxCLogLevel::Error,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OxCLogRecord {
    pub level: OxCLogLevel,
    pub target: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl OxCLogRecord {
    pub fn to_json(&self) -> Value {
        let mut data = Map::new();
        data.insert("level".into(), json!(self.level.as_str()));
        data.insert("target".into(), json!(self.target));
        data.insert("message".into(), json!(self.message));
        data.insert(
            "timestamp".into(),
            json!(self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Value::Object(data)
    }
}

/// `log` facade backend. Install once with [`OxCLogger::init`]; the library
/// itself only ever talks to the `log` macros.
pub struct OxCLogger {
    config: OxCLogConfig,
    handlers: Vec<Box<dyn OxLogHandler + Send + Sync>>,
}

impl OxCLogger {
    pub fn new(config: OxCLogConfig) -> Self {
        let mut handlers: Vec<Box<dyn OxLogHandler + Send + Sync>> = Vec::new();
        if config.console_enabled {
            handlers.push(Box::new(OxCStderrHandler::new(config.json_format)));
        }
        if let Some(path) = &config.file_path {
            handlers.push(Box::new(OxCFileHandler::new(path.clone(), config.json_format)));
        }
        OxCLogger { config, handlers }
    }

    /// Install the global logger. Safe to call multiple times; the first
    /// call wins and later calls return `false`.
    pub fn init(config: OxCLogConfig) -> bool {
        let level = config.level_filter();
        match log::set_boxed_logger(Box::new(OxCLogger::new(config))) {
            Ok(()) => {
                log::set_max_level(level);
                true
            }
            Err(_) => false,
        }
    }

    pub fn config(&self) -> &OxCLogConfig {
        &self.config
    }
}

impl log::Log for OxCLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.config.level_filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let record = OxCLogRecord {
            level: record.level().into(),
            target: record.target().to_string(),
            message: record.args().to_string(),
            timestamp: Utc::now(),
        };
        for h in &self.handlers {
            h.handle(&record);
        }
    }

    fn flush(&self) {}
}
