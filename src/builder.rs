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

//! # AST Builder
//!
//! Recursive-descent parser and type-checker turning a token sequence into
//! an [`OxCRoot`].
//!
//! ## Parsing Model
//!
//! - The first token names the root operator
//! - Output destinations are taken from the very end of the token list
//!   before any input is resolved
//! - The remaining tokens form one shared stream; every operator pops its
//!   inputs from the front of it, recursing into child operators, so
//!   nesting depth is unbounded
//! - A group (`[ ... ]`) placed first among an operator's inputs bounds
//!   that operator's whole input list
//!
//! ## Example
//!
//! ```text
//! -add -mul,2,3 4 out.txt   =>   out.txt [ add [ mul 4 ] ]
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ast::{OxCInvocation, OxCNode, OxCRoot};
use crate::errors::{OxError, OxCSpan, Result};
use crate::registry::OxCRegistry;
use crate::resolver::OxResolver;
use crate::schema::{OxCParameter, OxCSchema};
use crate::token::{OxCOperatorToken, OxCToken};
use crate::value::OxCValue;

/// Tokens still to be consumed, each with its original position. Stored
/// reversed so the next token is at the end.
#[derive(Debug)]
struct OxCTokenStream {
    tokens: Vec<(usize, OxCToken)>,
}

impl OxCTokenStream {
    fn new(mut tokens: Vec<(usize, OxCToken)>) -> Self {
        tokens.reverse();
        OxCTokenStream { tokens }
    }

    fn pop(&mut self) -> Option<(usize, OxCToken)> {
        self.tokens.pop()
    }

    fn peek(&self) -> Option<&(usize, OxCToken)> {
        self.tokens.last()
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Remove tokens up to the bracket closing the group opened at `open`.
    /// The closing bracket is dropped; nested groups are kept intact.
    fn take_group(&mut self, open: usize) -> Result<OxCTokenStream> {
        let mut depth = 0usize;
        let mut inner = Vec::new();
        while let Some((index, token)) = self.pop() {
            match token {
                OxCToken::LeftGroup(_) => depth += 1,
                OxCToken::RightGroup(_) if depth == 0 => return Ok(OxCTokenStream::new(inner)),
                OxCToken::RightGroup(_) => depth -= 1,
                _ => {}
            }
            inner.push((index, token));
        }
        Err(OxError::UnterminatedGroup { index: open })
    }
}

/// Builds expression trees against a registry and an optional resolver.
pub struct OxCAstBuilder<'a> {
    registry: &'a OxCRegistry,
    resolver: Option<&'a dyn OxResolver>,
    strict_literals: bool,
}

impl<'a> OxCAstBuilder<'a> {
    pub fn new(registry: &'a OxCRegistry) -> Self {
        OxCAstBuilder {
            registry,
            resolver: None,
            strict_literals: false,
        }
    }

    pub fn with_resolver(mut self, resolver: &'a dyn OxResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn strict_literals(mut self, strict: bool) -> Self {
        self.strict_literals = strict;
        self
    }

    /// Build a routed pipeline: the root must be able to route its value,
    /// and its destinations are taken from the end of `tokens`.
    pub fn build(&self, tokens: Vec<OxCToken>) -> Result<OxCRoot> {
        self.build_root(tokens, false)
    }

    /// Build a pipeline whose value is returned to the caller. No
    /// destinations are consumed and any output-typed root is accepted.
    pub fn build_value(&self, tokens: Vec<OxCToken>) -> Result<OxCRoot> {
        self.build_root(tokens, true)
    }

    fn build_root(&self, tokens: Vec<OxCToken>, embedded: bool) -> Result<OxCRoot> {
        let total = tokens.len();
        log::debug!(
            "builder.parse.start: building pipeline - tokens={}, embedded={}",
            total,
            embedded
        );

        let mut indexed: Vec<(usize, OxCToken)> = tokens.into_iter().enumerate().collect();
        if indexed.is_empty() {
            return Err(OxError::EmptyPipeline);
        }
        let (_, first) = indexed.remove(0);
        let op_token = match first {
            OxCToken::Operator(op) => op,
            other => {
                return Err(OxError::OperatorNotFound {
                    index: 0,
                    name: other.text().to_string(),
                })
            }
        };
        let schema = self.lookup(&op_token.name, 0)?;

        let destinations = if embedded {
            Vec::new()
        } else {
            self.take_destinations(&op_token, &schema, &mut indexed, total)?
        };

        let mut stream = OxCTokenStream::new(indexed);
        let node = self.resolve(&op_token, schema, 0, &mut stream)?;

        if let Some((index, _)) = stream.peek() {
            return Err(OxError::TooManyInputs {
                index: *index,
                extra: stream.len(),
            });
        }

        log::debug!(
            "builder.parse.finish: pipeline built - root={}, destinations={}",
            op_token.name,
            destinations.len()
        );

        Ok(if embedded {
            OxCRoot::embedded(node)
        } else {
            OxCRoot::new(node, destinations)
        })
    }

    fn take_destinations(
        &self,
        op_token: &OxCOperatorToken,
        schema: &OxCSchema,
        indexed: &mut Vec<(usize, OxCToken)>,
        total: usize,
    ) -> Result<Vec<String>> {
        let output = schema.output();
        if !output.is_root_eligible() {
            return Err(OxError::UnsupportedRootOperator {
                index: 0,
                name: op_token.name.clone(),
            });
        }
        let arity = output.arity();
        if arity == 0 {
            return Ok(Vec::new());
        }

        // every input slot takes at least one token
        let available = indexed.len().saturating_sub(schema.min_inputs());
        if available < arity {
            return Err(OxError::MissingOutputDestination {
                index: total - 1,
                operator: op_token.name.clone(),
                expected: arity,
                found: available,
            });
        }

        let tail = indexed.split_off(indexed.len() - arity);
        tail.into_iter()
            .map(|(index, token)| match token {
                OxCToken::Literal(text) => Ok(text),
                other => Err(OxError::DestinationNotLiteral {
                    index,
                    token: other.text().to_string(),
                }),
            })
            .collect()
    }

    fn lookup(&self, name: &str, index: usize) -> Result<Arc<OxCSchema>> {
        if let Some(resolver) = self.resolver {
            if resolver.matches(name) {
                return resolver.resolve(name).map_err(|message| OxError::Resolver {
                    index,
                    name: name.to_string(),
                    message,
                });
            }
        }
        self.registry
            .get(name)
            .ok_or_else(|| OxError::OperatorNotFound {
                index,
                name: name.to_string(),
            })
    }

    /// Turn one operator token into a node, consuming its inputs from
    /// `stream`.
    fn resolve(
        &self,
        op_token: &OxCOperatorToken,
        schema: Arc<OxCSchema>,
        index: usize,
        stream: &mut OxCTokenStream,
    ) -> Result<OxCNode> {
        let (args, kwargs) = self.parse_params(op_token, &schema, index)?;
        let op = OxCInvocation {
            name: op_token.name.clone(),
            index,
            schema: schema.clone(),
            args,
            kwargs,
        };

        if !schema.has_inputs() {
            log::debug!(
                "builder.operator.resolved: leaf operator - name={}, index={}",
                op.name,
                index
            );
            return Ok(OxCNode::Leaf(op));
        }

        let missing = |found: usize| OxError::MissingInputs {
            index,
            operator: op_token.name.clone(),
            expected: schema.min_inputs(),
            found,
        };

        let open = match stream.peek() {
            None => return Err(missing(0)),
            Some((open, OxCToken::LeftGroup(_))) => Some(*open),
            Some(_) => None,
        };
        let grouped = match open {
            Some(open) => {
                stream.pop();
                Some(stream.take_group(open)?)
            }
            None => None,
        };

        let node = match grouped {
            Some(mut inner) => {
                let node = self.resolve_inputs(op, &schema, &mut inner)?;
                if let Some((leftover, _)) = inner.peek() {
                    return Err(OxError::TooManyInputs {
                        index: *leftover,
                        extra: inner.len(),
                    });
                }
                node
            }
            None => self.resolve_inputs(op, &schema, stream)?,
        };

        let found = match &node {
            OxCNode::Composite { inputs, .. } => inputs.len(),
            OxCNode::Delegate { raw, .. } => raw.len(),
            _ => 0,
        };
        if found < schema.min_inputs() {
            return Err(missing(found));
        }

        log::debug!(
            "builder.operator.resolved: operator resolved - name={}, index={}, inputs={}",
            op_token.name,
            index,
            found
        );
        Ok(node)
    }

    fn resolve_inputs(
        &self,
        op: OxCInvocation,
        schema: &OxCSchema,
        stream: &mut OxCTokenStream,
    ) -> Result<OxCNode> {
        if schema.is_delegate() {
            let mut raw = Vec::new();
            for slot in schema.iter_inputs() {
                let Some((child_index, token)) = stream.pop() else {
                    break;
                };
                let text = token.text().to_string();
                // validated for the build phase only, the callback gets the text
                self.validate_literal(&op.name, slot, child_index, &text)?;
                raw.push(text);
            }
            return Ok(OxCNode::Delegate { op, raw });
        }

        let mut inputs = Vec::new();
        for slot in schema.iter_inputs() {
            let Some((child_index, token)) = stream.pop() else {
                break;
            };
            let child = match token {
                OxCToken::Operator(child_token) => {
                    let child_schema = self.lookup(&child_token.name, child_index)?;
                    self.check_chain(&op, slot, &child_token, &child_schema, child_index)?;
                    self.resolve(&child_token, child_schema, child_index, stream)?
                }
                OxCToken::Literal(text) => OxCNode::Literal {
                    index: child_index,
                    value: self.validate_literal(&op.name, slot, child_index, &text)?,
                    text,
                },
                other => {
                    return Err(OxError::UnsupportedSyntax {
                        index: child_index,
                        token: other.text().to_string(),
                    })
                }
            };
            inputs.push(child);
        }
        Ok(OxCNode::Composite { op, inputs })
    }

    fn check_chain(
        &self,
        consumer: &OxCInvocation,
        slot: &OxCParameter,
        producer: &OxCOperatorToken,
        producer_schema: &OxCSchema,
        child_index: usize,
    ) -> Result<()> {
        let chain_error = |received: String| OxError::ChainType {
            index: consumer.index,
            child_index,
            consumer: consumer.name.clone(),
            producer: producer.name.clone(),
            expected: slot.ty().to_string(),
            received,
        };
        match producer_schema.output().ty() {
            None => Err(chain_error("none".to_string())),
            Some(ty) if !slot.ty().accepts(ty) => Err(chain_error(ty.to_string())),
            Some(_) => Ok(()),
        }
    }

    fn validate_literal(
        &self,
        operator: &str,
        slot: &OxCParameter,
        index: usize,
        text: &str,
    ) -> Result<OxCValue> {
        slot.build_validator(self.strict_literals)
            .validate_text(text)
            .map_err(|cause| OxError::BuildValidation {
                index,
                operator: operator.to_string(),
                parameter: slot.name().to_string(),
                span: None,
                cause,
            })
    }

    /// Bind the inline parameter items of `op_token` to the schema's config
    /// parameters.
    fn parse_params(
        &self,
        op_token: &OxCOperatorToken,
        schema: &OxCSchema,
        index: usize,
    ) -> Result<(Vec<OxCValue>, BTreeMap<String, OxCValue>)> {
        let arity_error = |span: Option<OxCSpan>, message: String| OxError::Arity {
            index,
            operator: op_token.name.clone(),
            span,
            message,
        };
        let whole = match (op_token.params.first(), op_token.params.last()) {
            (Some(first), Some(last)) => Some(OxCSpan::new(first.span.start, last.span.end)),
            _ => None,
        };

        let mut args = Vec::new();
        let mut kwargs: BTreeMap<String, OxCValue> = BTreeMap::new();
        let mut positional = schema.iter_positional_config();

        for item in &op_token.params {
            let param = match &item.key {
                Some(key) => {
                    if kwargs.contains_key(key) {
                        return Err(arity_error(
                            Some(item.span),
                            format!("duplicate keyword argument `{}`", key),
                        ));
                    }
                    match schema.keyword(key) {
                        Some(param) => param,
                        None => {
                            return Err(arity_error(
                                Some(item.span),
                                format!("unknown keyword argument `{}`", key),
                            ))
                        }
                    }
                }
                None => {
                    if !kwargs.is_empty() {
                        return Err(arity_error(
                            Some(item.span),
                            "positional argument after keyword argument".to_string(),
                        ));
                    }
                    match positional.next() {
                        Some(param) => param,
                        None => {
                            return Err(arity_error(
                                Some(item.span),
                                format!(
                                    "too many arguments: expected at most {}",
                                    schema.max_positional_count().unwrap_or(args.len())
                                ),
                            ))
                        }
                    }
                }
            };

            let value = param
                .build_validator(self.strict_literals)
                .validate_text(&item.value)
                .map_err(|cause| OxError::BuildValidation {
                    index,
                    operator: op_token.name.clone(),
                    parameter: item.key.clone().unwrap_or_else(|| param.name().to_string()),
                    span: Some(item.span),
                    cause,
                })?;
            match &item.key {
                Some(key) => {
                    kwargs.insert(key.clone(), value);
                }
                None => args.push(value),
            }
        }

        let required = schema.required_positional_count();
        if args.len() < required {
            return Err(arity_error(
                whole,
                format!(
                    "missing arguments: expected at least {}, got {}",
                    required,
                    args.len()
                ),
            ));
        }
        for name in schema.required_keywords() {
            if !kwargs.contains_key(name) {
                return Err(arity_error(
                    whole,
                    format!("missing required keyword argument `{}`", name),
                ));
            }
        }

        Ok((args, kwargs))
    }
}
