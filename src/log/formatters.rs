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

use chrono::SecondsFormat;

use crate::log::core::OxCLogRecord;

pub struct OxCJsonFormatter;

impl OxCJsonFormatter {
    pub fn format(record: &OxCLogRecord) -> String {
        record.to_json().to_string()
    }
}

pub struct OxCTextFormatter;

impl OxCTextFormatter {
    pub fn format(record: &OxCLogRecord) -> String {
        format!(
            "{} {:<5} {}: {}",
            record
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            record.level.as_str(),
            record.target,
            record.message
        )
    }
}
