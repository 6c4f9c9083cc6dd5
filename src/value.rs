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

//! # Oxchain Value Module
//!
//! Runtime values flowing between operators and the nominal type tags used
//! by the chain type-check.
//!
//! Values are a small closed set of scalar and aggregate kinds. Type tags
//! are compared by exact nominal equality; `OxCType::Any` is the wildcard
//! and `OxCType::Named` lets an application introduce its own nominal types
//! (for example `Named("image")`) whose runtime payload is carried as one of
//! the built-in value kinds.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Nominal type tag of a parameter or an operator output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OxCType {
    /// Wildcard: accepts and is accepted by every other type.
    Any,
    Bool,
    Int,
    Float,
    Text,
    List,
    Map,
    /// Application-defined nominal type.
    Named(String),
}

impl OxCType {
    pub fn named(name: impl Into<String>) -> Self {
        OxCType::Named(name.into())
    }

    pub fn is_any(&self) -> bool {
        matches!(self, OxCType::Any)
    }

    /// Chain rule: a slot of type `self` accepts a producer of type `other`
    /// when either side is the wildcard or both names are equal.
    pub fn accepts(&self, other: &OxCType) -> bool {
        self.is_any() || other.is_any() || self == other
    }
}

impl fmt::Display for OxCType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OxCType::Any => write!(f, "any"),
            OxCType::Bool => write!(f, "bool"),
            OxCType::Int => write!(f, "int"),
            OxCType::Float => write!(f, "float"),
            OxCType::Text => write!(f, "text"),
            OxCType::List => write!(f, "list"),
            OxCType::Map => write!(f, "map"),
            OxCType::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Runtime value passed between operators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OxCValue {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<OxCValue>),
    Map(BTreeMap<String, OxCValue>),
}

impl OxCValue {
    /// Name of the value kind, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            OxCValue::Unit => "unit",
            OxCValue::Bool(_) => "bool",
            OxCValue::Int(_) => "int",
            OxCValue::Float(_) => "float",
            OxCValue::Text(_) => "text",
            OxCValue::List(_) => "list",
            OxCValue::Map(_) => "map",
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, OxCValue::Unit)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OxCValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            OxCValue::Float(f) => Some(*f),
            OxCValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OxCValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for OxCValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OxCValue::Unit => Ok(()),
            OxCValue::Bool(b) => write!(f, "{}", b),
            OxCValue::Int(i) => write!(f, "{}", i),
            OxCValue::Float(x) => write!(f, "{}", x),
            OxCValue::Text(s) => write!(f, "{}", s),
            OxCValue::List(_) | OxCValue::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<bool> for OxCValue {
    fn from(v: bool) -> Self {
        OxCValue::Bool(v)
    }
}

impl From<i64> for OxCValue {
    fn from(v: i64) -> Self {
        OxCValue::Int(v)
    }
}

impl From<f64> for OxCValue {
    fn from(v: f64) -> Self {
        OxCValue::Float(v)
    }
}

impl From<&str> for OxCValue {
    fn from(v: &str) -> Self {
        OxCValue::Text(v.to_string())
    }
}

impl From<String> for OxCValue {
    fn from(v: String) -> Self {
        OxCValue::Text(v)
    }
}

impl From<Vec<OxCValue>> for OxCValue {
    fn from(v: Vec<OxCValue>) -> Self {
        OxCValue::List(v)
    }
}
