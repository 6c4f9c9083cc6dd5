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

//! # Operator Registry Module
//!
//! Maps operator names to their schemas. The registry is filled once before
//! any command line is parsed and is read-only afterwards.
//!
//! ## Registry Operations
//!
//! - Register schemas under unique names (duplicates are rejected)
//! - Look up a schema by name
//! - Iterate registered operators in name order

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::{OxError, Result};
use crate::schema::OxCSchema;

#[derive(Debug, Default, Clone)]
pub struct OxCRegistry {
    inner: BTreeMap<String, Arc<OxCSchema>>,
}

impl OxCRegistry {
    pub fn new() -> Self {
        OxCRegistry {
            inner: BTreeMap::new(),
        }
    }

    /// Insert `schema` under its own name.
    pub fn register(&mut self, schema: OxCSchema) -> Result<()> {
        let name = schema.name().to_string();
        if self.inner.contains_key(&name) {
            return Err(OxError::registration(name, "operator already registered"));
        }
        log::debug!(
            "registry.operator.register: operator registered - name={}, params={}",
            name,
            schema.params().len()
        );
        self.inner.insert(name, Arc::new(schema));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<OxCSchema>> {
        self.inner.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.inner.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<OxCSchema>)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
