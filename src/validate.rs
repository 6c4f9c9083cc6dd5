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

//! # Oxchain Validation Module
//!
//! Every parameter owns two validators, one per phase:
//!
//! - **Build phase**: applied to literal token text while parsing
//! - **Execute phase**: applied to runtime values while evaluating
//!
//! The parameter's declared type is enforced only in its *core* phase; in
//! the other phase the validator treats the type as `Any` so a value is
//! never coerced twice. Extra checks attached to a phase always run in that
//! phase, before the type check.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value::{OxCType, OxCValue};

/// Point at which a value is validated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OxCPhase {
    #[default]
    Build,
    Execute,
}

/// User-supplied check run before the type check of its phase. It may
/// transform the value (e.g. trim text) or reject it with a message.
pub type OxCheck = Arc<dyn Fn(OxCValue) -> std::result::Result<OxCValue, String> + Send + Sync>;

/// Wrap a closure as an [`OxCheck`].
pub fn check<F>(f: F) -> OxCheck
where
    F: Fn(OxCValue) -> std::result::Result<OxCValue, String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Validator for one parameter in one phase.
#[derive(Clone)]
pub struct OxCValidator {
    ty: OxCType,
    strict: bool,
    checks: Vec<OxCheck>,
}

impl fmt::Debug for OxCValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OxCValidator")
            .field("ty", &self.ty)
            .field("strict", &self.strict)
            .field("checks", &self.checks.len())
            .finish()
    }
}

impl OxCValidator {
    pub fn new(ty: OxCType, strict: bool, checks: Vec<OxCheck>) -> Self {
        OxCValidator { ty, strict, checks }
    }

    /// Build the validator of `phase` for a parameter whose declared type is
    /// enforced in `core_phase`.
    pub fn for_phase(
        ty: &OxCType,
        strict: bool,
        core_phase: OxCPhase,
        phase: OxCPhase,
        checks: Vec<OxCheck>,
    ) -> Self {
        let effective = if core_phase == phase {
            ty.clone()
        } else {
            OxCType::Any
        };
        OxCValidator::new(effective, strict, checks)
    }

    pub fn ty(&self) -> &OxCType {
        &self.ty
    }

    pub fn validate(&self, value: OxCValue) -> std::result::Result<OxCValue, String> {
        let mut value = value;
        for check in &self.checks {
            value = check(value)?;
        }
        coerce(&self.ty, value, self.strict)
    }

    /// Validate raw token text.
    pub fn validate_text(&self, text: &str) -> std::result::Result<OxCValue, String> {
        self.validate(OxCValue::Text(text.to_string()))
    }
}

/// Convert `value` to `ty`. Non-strict mode parses numbers and booleans out
/// of text; integers always widen to floats.
pub fn coerce(ty: &OxCType, value: OxCValue, strict: bool) -> std::result::Result<OxCValue, String> {
    match (ty, value) {
        (OxCType::Any, value) => Ok(value),
        (OxCType::Named(_), OxCValue::Unit) => Err("expected a value, got unit".to_string()),
        (OxCType::Named(_), value) => Ok(value),

        (OxCType::Bool, OxCValue::Bool(b)) => Ok(OxCValue::Bool(b)),
        (OxCType::Bool, OxCValue::Text(s)) if !strict => parse_bool(&s)
            .map(OxCValue::Bool)
            .ok_or_else(|| format!("expected bool, got `{}`", s)),
        (OxCType::Bool, OxCValue::Int(i)) if !strict && (i == 0 || i == 1) => Ok(OxCValue::Bool(i == 1)),

        (OxCType::Int, OxCValue::Int(i)) => Ok(OxCValue::Int(i)),
        (OxCType::Int, OxCValue::Text(s)) if !strict => s
            .trim()
            .parse::<i64>()
            .map(OxCValue::Int)
            .map_err(|_| format!("expected int, got `{}`", s)),

        (OxCType::Float, OxCValue::Float(x)) => Ok(OxCValue::Float(x)),
        (OxCType::Float, OxCValue::Int(i)) => Ok(OxCValue::Float(i as f64)),
        (OxCType::Float, OxCValue::Text(s)) if !strict => s
            .trim()
            .parse::<f64>()
            .map(OxCValue::Float)
            .map_err(|_| format!("expected float, got `{}`", s)),

        (OxCType::Text, OxCValue::Text(s)) => Ok(OxCValue::Text(s)),
        (OxCType::List, OxCValue::List(items)) => Ok(OxCValue::List(items)),
        (OxCType::Map, OxCValue::Map(map)) => Ok(OxCValue::Map(map)),

        (ty, OxCValue::Text(s)) => Err(format!("expected {}, got `{}`", ty, s)),
        (ty, other) => Err(format!("expected {}, got {}", ty, other.kind())),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
