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

//! # Log Module
//!
//! Backend for the `log` facade used across Oxchain. Records go to stderr
//! (text or JSON lines) and optionally to an append-mode file.

pub mod config;
pub mod core;
pub mod formatters;
pub mod handlers;

pub use self::config::{OxCLogConfig, OxCLogConfigBuilder};
pub use self::core::{OxCLogLevel, OxCLogRecord, OxCLogger};
