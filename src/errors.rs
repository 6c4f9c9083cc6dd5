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

//! # Oxchain Error Module
//!
//! This module defines the error taxonomy shared by the tokenizer, the AST
//! builder, the execution engine and the registration interface.
//!
//! ## Error Handling Philosophy
//!
//! - **Positioned**: Every error raised while parsing a command line carries
//!   the zero-based index of the offending token, and parameter-string
//!   errors additionally carry a character span inside that token
//! - **Fail Fast**: An error aborts parsing or execution where it is first
//!   detected; there are no partial trees and no partial results
//! - **Serde Support**: Errors can be serialized so a presentation layer
//!   (or a test) can inspect them structurally
//!
//! ## Error Categories
//!
//! - **Parse**: Syntax, lookup, arity, chaining and build-phase validation
//! - **Execute**: Execute-phase validation, callback and routing failures
//! - **Registration**: Invalid schemas or duplicate operator names
//! - **Config/Io/Serde/Internal**: Ambient failures
//!
//! ## Usage
//!
//! ```rust
//! use oxchain::errors::{OxError, Result};
//!
//! fn check(count: usize) -> Result<()> {
//!     if count == 0 {
//!         return Err(OxError::callback_failure("count must be positive"));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Oxchain.
pub type Result<T> = std::result::Result<T, OxError>;

/// Byte range inside a single token's text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OxCSpan {
    pub start: usize,
    pub end: usize,
}

impl OxCSpan {
    pub fn new(start: usize, end: usize) -> Self {
        OxCSpan { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for OxCSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Canonical error enumeration for Oxchain.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum OxError {
    /// The command line contained no tokens at all.
    #[error("pipeline is empty")]
    EmptyPipeline,

    /// A token looked like an operator but could not be split into a name
    /// and a parameter string.
    #[error("syntax error in token {index} (`{token}`) at offset {offset}: {message}")]
    Syntax {
        index: usize,
        token: String,
        offset: usize,
        message: String,
    },

    /// Unknown operator name, or a literal where an operator was expected.
    #[error("operator `{name}` not found")]
    OperatorNotFound { index: usize, name: String },

    /// The root operator produces a value but has no way to route it.
    #[error("operator `{name}` cannot be used as root operator")]
    UnsupportedRootOperator { index: usize, name: String },

    /// Fewer trailing destination tokens than the root output requires.
    /// `found` counts the tokens left once the root's minimum inputs are
    /// set aside.
    #[error("operator `{operator}` needs {expected} output destination(s) after its inputs, but only {found} token(s) remain for them")]
    MissingOutputDestination {
        index: usize,
        operator: String,
        expected: usize,
        found: usize,
    },

    /// A trailing destination token was not a literal.
    #[error("output destination must be a literal, got `{token}`")]
    DestinationNotLiteral { index: usize, token: String },

    /// An operator received fewer inputs than its schema requires.
    #[error("missing inputs for operator `{operator}`: expected at least {expected}, got {found}")]
    MissingInputs {
        index: usize,
        operator: String,
        expected: usize,
        found: usize,
    },

    /// Tokens were left over once the tree was fully resolved.
    #[error("got too many inputs: {extra} token(s) left over")]
    TooManyInputs { index: usize, extra: usize },

    /// A producer's output type does not match the consuming slot.
    #[error("operators `{consumer}` and `{producer}` cannot be chained: expected `{expected}`, received `{received}`")]
    ChainType {
        index: usize,
        child_index: usize,
        consumer: String,
        producer: String,
        expected: String,
        received: String,
    },

    /// Inline parameter string does not fit the operator's config parameters.
    #[error("invalid arguments for operator `{operator}`: {message}")]
    Arity {
        index: usize,
        operator: String,
        span: Option<OxCSpan>,
        message: String,
    },

    /// A literal value failed its build-phase validator.
    #[error("data validation failed for `{parameter}` of operator `{operator}`: {cause}")]
    BuildValidation {
        index: usize,
        operator: String,
        parameter: String,
        span: Option<OxCSpan>,
        cause: String,
    },

    /// A runtime value failed its execute-phase validator.
    #[error("data validation failed during execution for `{parameter}` of operator `{operator}`: {cause}")]
    ExecuteValidation {
        index: usize,
        operator: String,
        parameter: String,
        cause: String,
    },

    /// An operator callback reported a failure.
    #[error("an error occurred while executing operator `{operator}`: {message}")]
    Callback {
        index: usize,
        operator: String,
        message: String,
    },

    /// The destination router of the root operator failed.
    #[error("failed to route output of operator `{operator}`: {message}")]
    Routing { operator: String, message: String },

    /// An opening group bracket had no matching closing bracket.
    #[error("missing closing bracket")]
    UnterminatedGroup { index: usize },

    /// A token kind that is not legal at its position.
    #[error("this syntax is not supported: `{token}`")]
    UnsupportedSyntax { index: usize, token: String },

    /// The external operator resolver failed.
    #[error("failed to resolve operator `{name}`: {message}")]
    Resolver {
        index: usize,
        name: String,
        message: String,
    },

    /// Invalid schema or duplicate registration; a programming error.
    #[error("cannot register operator `{name}`: {message}")]
    Registration { name: String, message: String },

    /// Invalid configuration values.
    #[error("config error: {message}")]
    Config { message: String },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for OxError {
    fn from(err: io::Error) -> Self {
        OxError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for OxError {
    fn from(err: serde_json::Error) -> Self {
        OxError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for OxError {
    fn from(err: serde_yaml::Error) -> Self {
        OxError::Serde(err.to_string())
    }
}

impl OxError {
    /// Helper to construct registration errors.
    pub fn registration(name: impl Into<String>, message: impl Into<String>) -> Self {
        OxError::Registration {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct config errors.
    pub fn config<T: Into<String>>(message: T) -> Self {
        OxError::Config {
            message: message.into(),
        }
    }

    /// Error returned by an operator callback. The engine rewrites it with
    /// the operator name and token index before it leaves `execute`.
    pub fn callback_failure<T: Into<String>>(message: T) -> Self {
        OxError::Callback {
            index: 0,
            operator: String::new(),
            message: message.into(),
        }
    }

    /// Zero-based index of the offending token, if the error has one.
    pub fn token_index(&self) -> Option<usize> {
        match self {
            OxError::Syntax { index, .. }
            | OxError::OperatorNotFound { index, .. }
            | OxError::UnsupportedRootOperator { index, .. }
            | OxError::MissingOutputDestination { index, .. }
            | OxError::DestinationNotLiteral { index, .. }
            | OxError::MissingInputs { index, .. }
            | OxError::TooManyInputs { index, .. }
            | OxError::ChainType { index, .. }
            | OxError::Arity { index, .. }
            | OxError::BuildValidation { index, .. }
            | OxError::ExecuteValidation { index, .. }
            | OxError::Callback { index, .. }
            | OxError::UnterminatedGroup { index }
            | OxError::UnsupportedSyntax { index, .. }
            | OxError::Resolver { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Character span inside the offending token, if known.
    pub fn span(&self) -> Option<OxCSpan> {
        match self {
            OxError::Syntax { offset, token, .. } => {
                let end = if *offset < token.len() { offset + 1 } else { *offset };
                Some(OxCSpan::new(*offset, end))
            }
            OxError::Arity { span, .. } | OxError::BuildValidation { span, .. } => *span,
            _ => None,
        }
    }

    /// Raised while turning tokens into a tree.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            OxError::EmptyPipeline
                | OxError::Syntax { .. }
                | OxError::OperatorNotFound { .. }
                | OxError::UnsupportedRootOperator { .. }
                | OxError::MissingOutputDestination { .. }
                | OxError::DestinationNotLiteral { .. }
                | OxError::MissingInputs { .. }
                | OxError::TooManyInputs { .. }
                | OxError::ChainType { .. }
                | OxError::Arity { .. }
                | OxError::BuildValidation { .. }
                | OxError::UnterminatedGroup { .. }
                | OxError::UnsupportedSyntax { .. }
                | OxError::Resolver { .. }
        )
    }

    /// Raised while evaluating a built tree.
    pub fn is_execute_error(&self) -> bool {
        matches!(
            self,
            OxError::ExecuteValidation { .. } | OxError::Callback { .. } | OxError::Routing { .. }
        )
    }
}
