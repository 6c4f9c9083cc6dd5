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

//! # Operator Schema
//!
//! Declarative description of an operator: its ordered parameters, its
//! output descriptor and the callback to invoke. A schema is validated once,
//! when [`OxCSchemaBuilder::build`] runs, and is immutable afterwards.
//!
//! Parameters fall into two categories:
//!
//! - **Input**: filled by a child node (another operator or a literal token)
//! - **Config**: filled inline from the operator token's parameter string
//!
//! ```rust
//! use oxchain::schema::{OxCParameter, OxCSchema, OxCOutput};
//! use oxchain::value::{OxCType, OxCValue};
//!
//! let schema = OxCSchema::builder("round")
//!     .param(OxCParameter::input("x", OxCType::Float))
//!     .param(OxCParameter::config("ndigits", OxCType::Int).default(OxCValue::Int(0)))
//!     .output(OxCOutput::value(OxCType::Float))
//!     .callback(|args| Ok(args.value(0)?.clone()))
//!     .build()
//!     .unwrap();
//! assert_eq!(schema.min_inputs(), 1);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{OxError, Result};
use crate::validate::{OxCheck, OxCPhase, OxCValidator};
use crate::value::{OxCType, OxCValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OxCCategory {
    Input,
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OxCArity {
    Singular,
    VariadicPositional,
    KeywordSingular,
    VariadicKeyword,
}

impl OxCArity {
    pub fn is_positional(&self) -> bool {
        matches!(self, OxCArity::Singular | OxCArity::VariadicPositional)
    }

    pub fn is_keyword(&self) -> bool {
        !self.is_positional()
    }
}

/// One declared parameter.
#[derive(Clone)]
pub struct OxCParameter {
    name: String,
    category: OxCCategory,
    arity: OxCArity,
    ty: OxCType,
    default: Option<OxCValue>,
    build_checks: Vec<OxCheck>,
    execute_checks: Vec<OxCheck>,
    core_phase: OxCPhase,
    /// `None` follows the global `strict_literals` setting.
    strict: Option<bool>,
    description: Option<String>,
}

impl fmt::Debug for OxCParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OxCParameter")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("arity", &self.arity)
            .field("ty", &self.ty)
            .field("default", &self.default)
            .field("core_phase", &self.core_phase)
            .field("strict", &self.strict)
            .finish()
    }
}

impl OxCParameter {
    fn with(name: impl Into<String>, category: OxCCategory, arity: OxCArity, ty: OxCType) -> Self {
        OxCParameter {
            name: name.into(),
            category,
            arity,
            ty,
            default: None,
            build_checks: Vec::new(),
            execute_checks: Vec::new(),
            core_phase: OxCPhase::Build,
            strict: None,
            description: None,
        }
    }

    /// Singular input slot.
    pub fn input(name: impl Into<String>, ty: OxCType) -> Self {
        Self::with(name, OxCCategory::Input, OxCArity::Singular, ty)
    }

    /// Input slot repeated until the inputs run out.
    pub fn inputs(name: impl Into<String>, ty: OxCType) -> Self {
        Self::with(name, OxCCategory::Input, OxCArity::VariadicPositional, ty)
    }

    /// Positional config parameter.
    pub fn config(name: impl Into<String>, ty: OxCType) -> Self {
        Self::with(name, OxCCategory::Config, OxCArity::Singular, ty)
    }

    /// Variadic positional config parameter.
    pub fn configs(name: impl Into<String>, ty: OxCType) -> Self {
        Self::with(name, OxCCategory::Config, OxCArity::VariadicPositional, ty)
    }

    /// Keyword-only config parameter.
    pub fn keyword(name: impl Into<String>, ty: OxCType) -> Self {
        Self::with(name, OxCCategory::Config, OxCArity::KeywordSingular, ty)
    }

    /// Catch-all for keywords not declared elsewhere.
    pub fn keywords(name: impl Into<String>, ty: OxCType) -> Self {
        Self::with(name, OxCCategory::Config, OxCArity::VariadicKeyword, ty)
    }

    pub fn default(mut self, value: impl Into<OxCValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn build_check(mut self, check: OxCheck) -> Self {
        self.build_checks.push(check);
        self
    }

    pub fn execute_check(mut self, check: OxCheck) -> Self {
        self.execute_checks.push(check);
        self
    }

    /// Phase in which the declared type is enforced.
    pub fn core_phase(mut self, phase: OxCPhase) -> Self {
        self.core_phase = phase;
        self
    }

    /// Turn text coercion off (`true`) or keep it on even under
    /// `strict_literals` (`false`).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> OxCCategory {
        self.category
    }

    pub fn arity(&self) -> OxCArity {
        self.arity
    }

    pub fn ty(&self) -> &OxCType {
        &self.ty
    }

    pub fn default_value(&self) -> Option<&OxCValue> {
        self.default.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_input(&self) -> bool {
        self.category == OxCCategory::Input
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self.arity, OxCArity::VariadicPositional | OxCArity::VariadicKeyword)
    }

    /// Singular parameter without a default.
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.is_variadic()
    }

    /// Validator applied to literal tokens while parsing.
    pub fn build_validator(&self, strict_literals: bool) -> OxCValidator {
        OxCValidator::for_phase(
            &self.ty,
            self.strict.unwrap_or(strict_literals),
            self.core_phase,
            OxCPhase::Build,
            self.build_checks.clone(),
        )
    }

    /// Validator applied to runtime values while executing.
    pub fn execute_validator(&self) -> OxCValidator {
        OxCValidator::for_phase(
            &self.ty,
            self.strict.unwrap_or(false),
            self.core_phase,
            OxCPhase::Execute,
            self.execute_checks.clone(),
        )
    }
}

/// Sends the root value to its destinations.
pub type OxRouter = Arc<dyn Fn(&OxCValue, &[String]) -> Result<()> + Send + Sync>;

/// Operator body.
pub type OxCallback = Arc<dyn Fn(&OxCArgs) -> Result<OxCValue> + Send + Sync>;

/// Output descriptor of an operator.
#[derive(Clone)]
pub struct OxCOutput {
    ty: Option<OxCType>,
    arity: usize,
    router: Option<OxRouter>,
}

impl fmt::Debug for OxCOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OxCOutput")
            .field("ty", &self.ty)
            .field("arity", &self.arity)
            .field("routed", &self.router.is_some())
            .finish()
    }
}

impl OxCOutput {
    /// Operator returns nothing; it can only be a root.
    pub fn none() -> Self {
        OxCOutput {
            ty: None,
            arity: 0,
            router: None,
        }
    }

    /// Operator returns a value but cannot be a root.
    pub fn value(ty: OxCType) -> Self {
        OxCOutput {
            ty: Some(ty),
            arity: 0,
            router: None,
        }
    }

    /// Root-eligible output consuming `arity` trailing destinations.
    pub fn routed<F>(ty: OxCType, arity: usize, router: F) -> Self
    where
        F: Fn(&OxCValue, &[String]) -> Result<()> + Send + Sync + 'static,
    {
        OxCOutput {
            ty: Some(ty),
            arity,
            router: Some(Arc::new(router)),
        }
    }

    pub fn ty(&self) -> Option<&OxCType> {
        self.ty.as_ref()
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn router(&self) -> Option<&OxRouter> {
        self.router.as_ref()
    }

    /// Whether an operator with this output may sit at the root.
    pub fn is_root_eligible(&self) -> bool {
        self.ty.is_none() || self.router.is_some()
    }
}

/// Arguments handed to a callback: positional values in declared order
/// (variadics flattened) plus keyword values, defaults already filled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OxCArgs {
    pub positional: Vec<OxCValue>,
    pub keywords: BTreeMap<String, OxCValue>,
}

impl OxCArgs {
    pub fn new(positional: Vec<OxCValue>, keywords: BTreeMap<String, OxCValue>) -> Self {
        OxCArgs {
            positional,
            keywords,
        }
    }

    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    pub fn value(&self, index: usize) -> Result<&OxCValue> {
        self.positional
            .get(index)
            .ok_or_else(|| OxError::callback_failure(format!("missing argument #{}", index)))
    }

    pub fn float(&self, index: usize) -> Result<f64> {
        let value = self.value(index)?;
        value.as_float().ok_or_else(|| {
            OxError::callback_failure(format!("argument #{} is {}, not float", index, value.kind()))
        })
    }

    pub fn int(&self, index: usize) -> Result<i64> {
        let value = self.value(index)?;
        value.as_int().ok_or_else(|| {
            OxError::callback_failure(format!("argument #{} is {}, not int", index, value.kind()))
        })
    }

    pub fn text(&self, index: usize) -> Result<&str> {
        let value = self.value(index)?;
        value.as_text().ok_or_else(|| {
            OxError::callback_failure(format!("argument #{} is {}, not text", index, value.kind()))
        })
    }

    /// Positional values from `index` on.
    pub fn rest(&self, index: usize) -> &[OxCValue] {
        self.positional.get(index..).unwrap_or(&[])
    }

    pub fn keyword(&self, name: &str) -> Option<&OxCValue> {
        self.keywords.get(name)
    }
}

/// Registered description of one operator.
#[derive(Clone)]
pub struct OxCSchema {
    name: String,
    params: Vec<OxCParameter>,
    output: OxCOutput,
    callback: OxCallback,
    delegate: bool,
    description: Option<String>,
}

impl fmt::Debug for OxCSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OxCSchema")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("output", &self.output)
            .field("delegate", &self.delegate)
            .finish()
    }
}

impl OxCSchema {
    pub fn builder(name: impl Into<String>) -> OxCSchemaBuilder {
        OxCSchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[OxCParameter] {
        &self.params
    }

    pub fn output(&self) -> &OxCOutput {
        &self.output
    }

    pub fn callback(&self) -> &OxCallback {
        &self.callback
    }

    pub fn is_delegate(&self) -> bool {
        self.delegate
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Input slots in order; a variadic slot repeats forever.
    pub fn iter_inputs(&self) -> impl Iterator<Item = &OxCParameter> {
        repeat_variadic(self.params.iter().filter(|p| p.is_input()))
    }

    /// Positional config slots in order; a variadic slot repeats forever.
    pub fn iter_positional_config(&self) -> impl Iterator<Item = &OxCParameter> {
        repeat_variadic(
            self.params
                .iter()
                .filter(|p| !p.is_input() && p.arity().is_positional()),
        )
    }

    /// All positional parameters (inputs and config) in declared order.
    pub fn iter_positional(&self) -> impl Iterator<Item = &OxCParameter> {
        self.params.iter().filter(|p| p.arity().is_positional())
    }

    /// Keyword config slot named `name`, else the variadic-keyword slot.
    pub fn keyword(&self, name: &str) -> Option<&OxCParameter> {
        self.params
            .iter()
            .find(|p| p.arity() == OxCArity::KeywordSingular && p.name() == name)
            .or_else(|| {
                self.params
                    .iter()
                    .find(|p| p.arity() == OxCArity::VariadicKeyword)
            })
    }

    pub fn has_inputs(&self) -> bool {
        self.params.iter().any(OxCParameter::is_input)
    }

    /// Fixed inputs plus one for a variadic input slot.
    pub fn min_inputs(&self) -> usize {
        self.params.iter().filter(|p| p.is_input()).count()
    }

    pub fn required_positional_count(&self) -> usize {
        self.params
            .iter()
            .filter(|p| !p.is_input() && p.arity() == OxCArity::Singular && p.is_required())
            .count()
    }

    /// Upper bound of positional config values, `None` when variadic.
    pub fn max_positional_count(&self) -> Option<usize> {
        let config: Vec<_> = self
            .params
            .iter()
            .filter(|p| !p.is_input() && p.arity().is_positional())
            .collect();
        if config.iter().any(|p| p.is_variadic()) {
            None
        } else {
            Some(config.len())
        }
    }

    pub fn required_keywords(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.arity() == OxCArity::KeywordSingular && p.is_required())
            .map(OxCParameter::name)
            .collect()
    }
}

fn repeat_variadic<'a, I>(params: I) -> impl Iterator<Item = &'a OxCParameter>
where
    I: Iterator<Item = &'a OxCParameter> + Clone,
{
    let variadic = params.clone().find(|p| p.is_variadic());
    params
        .filter(|p| !p.is_variadic())
        .chain(variadic.into_iter().flat_map(std::iter::repeat))
}

/// Builder that validates the schema shape on [`build`](Self::build).
pub struct OxCSchemaBuilder {
    name: String,
    params: Vec<OxCParameter>,
    output: OxCOutput,
    callback: Option<OxCallback>,
    delegate: bool,
    description: Option<String>,
}

impl OxCSchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        OxCSchemaBuilder {
            name: name.into(),
            params: Vec::new(),
            output: OxCOutput::none(),
            callback: None,
            delegate: false,
            description: None,
        }
    }

    pub fn param(mut self, param: OxCParameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn output(mut self, output: OxCOutput) -> Self {
        self.output = output;
        self
    }

    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&OxCArgs) -> Result<OxCValue> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Inputs are kept as raw token text instead of being parsed.
    pub fn delegate(mut self, delegate: bool) -> Self {
        self.delegate = delegate;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> Result<OxCSchema> {
        let fail = |message: String| Err(OxError::registration(&self.name, message));

        let callback = match self.callback.clone() {
            Some(callback) => callback,
            None => return fail("no callback".to_string()),
        };

        let mut names = HashSet::new();
        let mut seen_keyword = false;
        let mut seen_var_keyword = false;
        let mut seen_var_positional = false;
        let mut seen_optional_config = false;

        for p in &self.params {
            if !names.insert(p.name()) {
                return fail(format!("duplicate parameter `{}`", p.name()));
            }
            if p.is_input() && p.default_value().is_some() {
                return fail(format!("input `{}` cannot have a default", p.name()));
            }
            if p.is_input() && p.arity().is_keyword() {
                return fail(format!("input `{}` cannot be a keyword parameter", p.name()));
            }
            if seen_var_keyword {
                return fail(format!("`{}` follows the variadic keyword parameter", p.name()));
            }
            match p.arity() {
                OxCArity::Singular | OxCArity::VariadicPositional => {
                    if seen_keyword {
                        return fail(format!("positional `{}` follows a keyword parameter", p.name()));
                    }
                    if seen_var_positional {
                        return fail(format!("`{}` follows the variadic positional parameter", p.name()));
                    }
                    if p.arity() == OxCArity::VariadicPositional {
                        seen_var_positional = true;
                    } else if !p.is_input() {
                        if p.is_required() && seen_optional_config {
                            return fail(format!(
                                "required `{}` follows an optional parameter",
                                p.name()
                            ));
                        }
                        seen_optional_config |= !p.is_required();
                    }
                }
                OxCArity::KeywordSingular => seen_keyword = true,
                OxCArity::VariadicKeyword => seen_var_keyword = true,
            }
        }

        if self.output.ty().is_none() && self.output.arity() > 0 {
            return fail("an operator without output cannot take destinations".to_string());
        }

        log::debug!(
            "schema.build: validated operator schema - name={}, params={}, delegate={}",
            self.name,
            self.params.len(),
            self.delegate
        );

        Ok(OxCSchema {
            name: self.name,
            params: self.params,
            output: self.output,
            callback,
            delegate: self.delegate,
            description: self.description,
        })
    }
}
