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

//! # Operator Resolver
//!
//! Hook for operators that live outside the static registry. When a
//! resolver is installed and claims an operator name, the AST builder asks
//! it for the schema instead of the registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use regex::Regex;

use crate::errors::{OxError, Result};
use crate::schema::OxCSchema;

/// Default name pattern for externally defined operators, e.g. `-scale.ox`.
pub const DEFAULT_EXTERNAL_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*\.ox$";

pub trait OxResolver: Send + Sync {
    /// Whether `name` should be resolved here instead of the registry.
    fn matches(&self, name: &str) -> bool;

    /// Failure messages become `OxError::Resolver` at the token's position.
    fn resolve(&self, name: &str) -> std::result::Result<Arc<OxCSchema>, String>;
}

/// Resolver backed by an in-memory map, selected by a name pattern.
#[derive(Debug, Clone)]
pub struct OxCMapResolver {
    pattern: Regex,
    schemas: BTreeMap<String, Arc<OxCSchema>>,
}

impl OxCMapResolver {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| OxError::config(format!("invalid resolver pattern: {}", e)))?;
        Ok(OxCMapResolver {
            pattern,
            schemas: BTreeMap::new(),
        })
    }

    pub fn with_default_pattern() -> Result<Self> {
        Self::new(DEFAULT_EXTERNAL_PATTERN)
    }

    /// Make `schema` resolvable under its own name.
    pub fn insert(&mut self, schema: OxCSchema) {
        self.schemas
            .insert(schema.name().to_string(), Arc::new(schema));
    }
}

impl OxResolver for OxCMapResolver {
    fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    fn resolve(&self, name: &str) -> std::result::Result<Arc<OxCSchema>, String> {
        self.schemas
            .get(name)
            .cloned()
            .ok_or_else(|| format!("module `{}` not found", name))
    }
}
