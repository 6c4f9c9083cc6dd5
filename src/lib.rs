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

//! # Oxchain Core Library
//!
//! Oxchain lets a program expose named operators (functions with typed
//! parameters and an optional typed output) and compose them on the command
//! line with a compact chaining syntax:
//!
//! ```text
//! -round,2 -div 10 3 out.txt
//! ```
//!
//! An operator token names an operator and carries its inline config
//! values; the tokens that follow supply its inputs, recursively; trailing
//! literals are the output destinations of the outermost operator.
//!
//! ## Module Overview
//!
//! - **token**: Classifies raw argument strings into tokens
//! - **schema**: Declarative operator descriptions validated at registration
//! - **registry**: Name to schema mapping filled before parsing
//! - **resolver**: Hook for operators defined outside the registry
//! - **builder**: Parser and type-checker producing an expression tree
//! - **ast**: The expression tree itself
//! - **engine**: Post-order evaluation and output routing
//! - **report**: Error pointers, synopses and operator listings
//! - **app**: Front-end glue with the builtin `print` operator
//! - **calc**: Calculator operators used by the `oxcalc` binary
//! - **config** / **log**: Configuration loading and the logger backend
//!
//! ## Quick Start
//!
//! ```rust
//! use oxchain::{OxCApp, OxCConfig, OxCOutput, OxCParameter, OxCSchema, OxCType, OxCValue};
//!
//! let mut app = OxCApp::new(OxCConfig::default()).unwrap();
//! app.register(
//!     OxCSchema::builder("add")
//!         .param(OxCParameter::input("a", OxCType::Float))
//!         .param(OxCParameter::input("b", OxCType::Float))
//!         .output(OxCOutput::value(OxCType::Float))
//!         .callback(|args| Ok(OxCValue::Float(args.float(0)? + args.float(1)?)))
//!         .build()
//!         .unwrap(),
//! )
//! .unwrap();
//!
//! let value = app.eval(&["-add", "1", "2"]).unwrap();
//! assert_eq!(value, OxCValue::Float(3.0));
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, OxError>`. Parse errors carry the index
//! of the offending token (and a character span for inline parameters) so
//! [`report::render_error`] can point at it.

pub mod errors;
pub mod value;
pub mod validate;
pub mod config;
pub mod log;
pub mod token;
pub mod schema;
pub mod registry;
pub mod resolver;
pub mod ast;
pub mod builder;
pub mod engine;
pub mod report;
pub mod app;
pub mod calc;

pub use errors::{OxError, OxCSpan, Result};
pub use value::{OxCType, OxCValue};
pub use validate::{check, OxCheck, OxCPhase, OxCValidator};
pub use config::{OxCConfig, OxCSyntaxConfig};
pub use token::{OxCOperatorToken, OxCParamItem, OxCToken, OxCTokenizer};
pub use schema::{
    OxCArgs, OxCArity, OxCallback, OxCCategory, OxCOutput, OxCParameter, OxRouter, OxCSchema,
    OxCSchemaBuilder,
};
pub use registry::OxCRegistry;
pub use resolver::{OxCMapResolver, OxResolver};
pub use ast::{OxCInvocation, OxCNode, OxCRoot};
pub use builder::OxCAstBuilder;
pub use app::OxCApp;
