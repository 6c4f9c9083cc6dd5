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

use serde::{Deserialize, Serialize};

/// Configuration for the OxCLogger (console/file enablement, default level
/// and JSON formatting).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OxCLogConfig {
    pub default_level: String,
    pub console_enabled: bool,
    /// One JSON object per line instead of plain text.
    pub json_format: bool,
    /// Optional log file, opened in append mode.
    pub file_path: Option<String>,
}

impl Default for OxCLogConfig {
    fn default() -> Self {
        OxCLogConfig {
            default_level: "WARNING".to_string(),
            console_enabled: true,
            json_format: false,
            file_path: None,
        }
    }
}

impl OxCLogConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.default_level.to_ascii_uppercase().as_str() {
            "TRACE" => log::LevelFilter::Trace,
            "DEBUG" => log::LevelFilter::Debug,
            "INFO" => log::LevelFilter::Info,
            "ERROR" => log::LevelFilter::Error,
            "OFF" => log::LevelFilter::Off,
            _ => log::LevelFilter::Warn,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OxCLogConfigBuilder {
    pub default_level: Option<String>,
    pub console_enabled: Option<bool>,
    pub json_format: Option<bool>,
    pub file_path: Option<String>,
}

impl OxCLogConfigBuilder {
    pub fn build(self) -> OxCLogConfig {
        let base = OxCLogConfig::default();
        OxCLogConfig {
            default_level: self.default_level.unwrap_or(base.default_level),
            console_enabled: self.console_enabled.unwrap_or(base.console_enabled),
            json_format: self.json_format.unwrap_or(base.json_format),
            file_path: self.file_path.or(base.file_path),
        }
    }
}
