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

//! # Execution Engine
//!
//! Evaluates a built tree with a synchronous post-order walk. Children of a
//! node run strictly left to right before the node's own callback, so
//! side effects and error attribution follow token order.
//!
//! For every operator node the engine:
//!
//! 1. executes its children and validates each result against its input slot
//! 2. validates the inline config values for the execute phase
//! 3. interleaves inputs and config values back into declared order,
//!    filling defaults for omitted optional parameters
//! 4. invokes the callback and validates its result against the output type

use std::collections::BTreeMap;

use crate::ast::{OxCInvocation, OxCNode, OxCRoot};
use crate::errors::{OxError, Result};
use crate::schema::{OxCArgs, OxCArity, OxCParameter};
use crate::validate::coerce;
use crate::value::OxCValue;

impl OxCNode {
    pub fn execute(&self) -> Result<OxCValue> {
        match self {
            OxCNode::Literal { value, .. } => Ok(value.clone()),
            OxCNode::Leaf(op) => invoke(op, Vec::new()),
            OxCNode::Composite { op, inputs } => {
                let mut values = Vec::with_capacity(inputs.len());
                for (child, slot) in inputs.iter().zip(op.schema.iter_inputs()) {
                    let value = child.execute()?;
                    values.push(validate_execute(op, slot, value)?);
                }
                invoke(op, values)
            }
            OxCNode::Delegate { op, raw } => {
                let mut values = Vec::with_capacity(raw.len());
                for (text, slot) in raw.iter().zip(op.schema.iter_inputs()) {
                    let value = OxCValue::Text(text.clone());
                    validate_execute(op, slot, value.clone())?;
                    values.push(value);
                }
                invoke(op, values)
            }
        }
    }
}

impl OxCRoot {
    /// Evaluate the tree, then route the value to the destinations.
    /// Returns the raw value when nothing is routed, else `Unit`.
    pub fn execute(&self) -> Result<OxCValue> {
        let value = self.node.execute()?;
        if self.return_value {
            return Ok(value);
        }
        let Some(op) = self.node.invocation() else {
            return Ok(value);
        };
        let output = op.schema.output();
        let router = match output.router() {
            Some(router) if output.arity() > 0 => router,
            _ => return Ok(value),
        };

        log::info!(
            "engine.output.route: routing value - operator={}, destinations={}",
            op.name,
            self.destinations.join(",")
        );
        router(&value, self.destinations.as_slice()).map_err(|e| OxError::Routing {
            operator: op.name.clone(),
            message: match e {
                OxError::Routing { message, .. } | OxError::Callback { message, .. } => message,
                other => other.to_string(),
            },
        })?;
        Ok(OxCValue::Unit)
    }
}

fn validate_execute(op: &OxCInvocation, param: &OxCParameter, value: OxCValue) -> Result<OxCValue> {
    param
        .execute_validator()
        .validate(value)
        .map_err(|cause| OxError::ExecuteValidation {
            index: op.index,
            operator: op.name.clone(),
            parameter: param.name().to_string(),
            cause,
        })
}

fn invoke(op: &OxCInvocation, inputs: Vec<OxCValue>) -> Result<OxCValue> {
    let schema = &op.schema;

    let mut args = Vec::with_capacity(op.args.len());
    for (value, param) in op.args.iter().zip(schema.iter_positional_config()) {
        args.push(validate_execute(op, param, value.clone())?);
    }
    let mut kwargs = BTreeMap::new();
    for (key, value) in &op.kwargs {
        if let Some(param) = schema.keyword(key) {
            kwargs.insert(key.clone(), validate_execute(op, param, value.clone())?);
        }
    }

    let call_args = compose(op, inputs, args, kwargs);
    log::debug!(
        "engine.operator.invoke: invoking operator - name={}, index={}, args={}",
        op.name,
        op.index,
        call_args.len()
    );

    let value = (schema.callback())(&call_args).map_err(|e| OxError::Callback {
        index: op.index,
        operator: op.name.clone(),
        message: match e {
            OxError::Callback { message, .. } => message,
            other => other.to_string(),
        },
    })?;

    let return_error = |cause: String| OxError::ExecuteValidation {
        index: op.index,
        operator: op.name.clone(),
        parameter: "return".to_string(),
        cause,
    };
    match schema.output().ty() {
        Some(ty) => coerce(ty, value, true).map_err(return_error),
        None if value.is_unit() => Ok(value),
        None => Err(return_error(format!("expected no value, got {}", value.kind()))),
    }
}

/// Rebuild the declared positional order from separately collected inputs
/// and config values; omitted optional parameters take their defaults.
fn compose(
    op: &OxCInvocation,
    inputs: Vec<OxCValue>,
    args: Vec<OxCValue>,
    kwargs: BTreeMap<String, OxCValue>,
) -> OxCArgs {
    let mut inputs = inputs.into_iter();
    let mut args = args.into_iter();
    let mut positional = Vec::new();

    for param in op.schema.iter_positional() {
        let source = if param.is_input() {
            &mut inputs
        } else {
            &mut args
        };
        match param.arity() {
            OxCArity::VariadicPositional => positional.extend(source.by_ref()),
            _ => match source.next().or_else(|| param.default_value().cloned()) {
                Some(value) => positional.push(value),
                None => break,
            },
        }
    }

    let mut keywords = BTreeMap::new();
    for param in op.schema.params() {
        if param.arity() == OxCArity::KeywordSingular {
            if let Some(default) = param.default_value() {
                keywords.insert(param.name().to_string(), default.clone());
            }
        }
    }
    keywords.extend(kwargs);

    OxCArgs::new(positional, keywords)
}
