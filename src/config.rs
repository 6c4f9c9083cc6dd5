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

//! # Oxchain Configuration Module
//!
//! Configuration for the command-line syntax and the ambient logger.
//!
//! Configurations can be written in JSON or YAML; missing keys fall back to
//! their defaults.
//!
//! ```yaml
//! syntax:
//!   marker: "-"
//!   arg_sep: ","
//!   kw_sep: "="
//!   group_open: "["
//!   group_close: "]"
//! log:
//!   default_level: DEBUG
//!   json_format: false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{OxError, Result};
use crate::log::OxCLogConfig;

/// Characters and delimiters recognised by the tokenizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OxCSyntaxConfig {
    /// Leading character of an operator token.
    pub marker: char,
    /// Separator between the operator name and each inline parameter.
    pub arg_sep: char,
    /// Separator between a keyword parameter's key and value.
    pub kw_sep: char,
    pub group_open: String,
    pub group_close: String,
}

impl Default for OxCSyntaxConfig {
    fn default() -> Self {
        OxCSyntaxConfig {
            marker: '-',
            arg_sep: ',',
            kw_sep: '=',
            group_open: "[".to_string(),
            group_close: "]".to_string(),
        }
    }
}

impl OxCSyntaxConfig {
    pub fn validate(&self) -> Result<()> {
        let seps = [self.marker, self.arg_sep, self.kw_sep];
        if seps[0] == seps[1] || seps[0] == seps[2] || seps[1] == seps[2] {
            return Err(OxError::config(format!(
                "marker `{}`, arg_sep `{}` and kw_sep `{}` must be distinct",
                self.marker, self.arg_sep, self.kw_sep
            )));
        }
        if self.marker.is_ascii_alphanumeric() || self.marker == '_' {
            return Err(OxError::config(format!(
                "marker `{}` cannot be a name character",
                self.marker
            )));
        }
        if self.group_open.is_empty() || self.group_close.is_empty() {
            return Err(OxError::config("group delimiters cannot be empty"));
        }
        if self.group_open == self.group_close {
            return Err(OxError::config("group delimiters must differ"));
        }
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OxCConfig {
    pub syntax: OxCSyntaxConfig,
    pub log: OxCLogConfig,
    /// Disable text-to-number coercion of literal tokens for every parameter
    /// that does not set its own `strict` flag.
    pub strict_literals: bool,
}

impl OxCConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_syntax(mut self, syntax: OxCSyntaxConfig) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn strict_literals(mut self, strict: bool) -> Self {
        self.strict_literals = strict;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.syntax.validate()
    }

    pub fn from_json(source: &str) -> Result<Self> {
        let config: OxCConfig = serde_json::from_str(source)
            .map_err(|e| OxError::config(format!("invalid JSON config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(source: &str) -> Result<Self> {
        let config: OxCConfig = serde_yaml::from_str(source)
            .map_err(|e| OxError::config(format!("invalid YAML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => Self::from_json(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            _ => Self::from_json(&content).or_else(|_| Self::from_yaml(&content)),
        }
    }
}
