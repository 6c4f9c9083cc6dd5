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

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::log::core::OxCLogRecord;
use crate::log::formatters::{OxCJsonFormatter, OxCTextFormatter};

pub trait OxLogHandler {
    fn handle(&self, record: &OxCLogRecord);
}

fn render(record: &OxCLogRecord, json: bool) -> String {
    if json {
        OxCJsonFormatter::format(record)
    } else {
        OxCTextFormatter::format(record)
    }
}

/// Writes to stderr; stdout is reserved for routed operator output.
pub struct OxCStderrHandler {
    json: bool,
}

impl OxCStderrHandler {
    pub fn new(json: bool) -> Self {
        OxCStderrHandler { json }
    }
}

impl OxLogHandler for OxCStderrHandler {
    fn handle(&self, record: &OxCLogRecord) {
        eprintln!("{}", render(record, self.json));
    }
}

pub struct OxCFileHandler {
    path: String,
    json: bool,
    file: Mutex<()>,
}

impl OxCFileHandler {
    pub fn new(path: String, json: bool) -> Self {
        OxCFileHandler {
            path,
            json,
            file: Mutex::new(()),
        }
    }
}

impl OxLogHandler for OxCFileHandler {
    fn handle(&self, record: &OxCLogRecord) {
        let _guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let line = render(record, self.json);
        if let Ok(mut f) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            let _ = writeln!(f, "{}", line);
        }
    }
}
