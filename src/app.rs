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

//! # Application Module
//!
//! [`OxCApp`] ties the pieces together for a command-line front end: it owns
//! the registry (pre-populated with the builtin `print` operator), the
//! configuration and an optional external resolver.
//!
//! ```rust
//! use oxchain::app::OxCApp;
//! use oxchain::config::OxCConfig;
//!
//! let app = OxCApp::new(OxCConfig::default()).unwrap();
//! assert!(app.list().contains("print"));
//! ```

use crate::ast::OxCRoot;
use crate::builder::OxCAstBuilder;
use crate::config::OxCConfig;
use crate::errors::Result;
use crate::registry::OxCRegistry;
use crate::report;
use crate::resolver::OxResolver;
use crate::schema::{OxCOutput, OxCParameter, OxCSchema};
use crate::token::OxCTokenizer;
use crate::value::{OxCType, OxCValue};

/// Name of the builtin operator printing its input to stdout.
pub const PRINT_OPERATOR: &str = "print";

pub struct OxCApp {
    registry: OxCRegistry,
    config: OxCConfig,
    resolver: Option<Box<dyn OxResolver>>,
}

impl OxCApp {
    pub fn new(config: OxCConfig) -> Result<Self> {
        config.validate()?;
        let mut registry = OxCRegistry::new();
        registry.register(print_schema()?)?;
        Ok(OxCApp {
            registry,
            config,
            resolver: None,
        })
    }

    pub fn with_resolver(mut self, resolver: Box<dyn OxResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn register(&mut self, schema: OxCSchema) -> Result<()> {
        self.registry.register(schema)
    }

    pub fn registry(&self) -> &OxCRegistry {
        &self.registry
    }

    pub fn config(&self) -> &OxCConfig {
        &self.config
    }

    fn builder(&self) -> OxCAstBuilder<'_> {
        let builder = OxCAstBuilder::new(&self.registry).strict_literals(self.config.strict_literals);
        match &self.resolver {
            Some(resolver) => builder.with_resolver(resolver.as_ref()),
            None => builder,
        }
    }

    /// Tokenize and build a routed pipeline.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<OxCRoot> {
        let tokens = OxCTokenizer::new(self.config.syntax.clone()).tokenize(args)?;
        self.builder().build(tokens).map_err(|e| {
            log::debug!("app.parse.failed: pipeline rejected - error={}", e);
            e
        })
    }

    /// Build and execute, routing the final value.
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<OxCValue> {
        let root = self.parse(args)?;
        root.execute().map_err(|e| {
            log::debug!("app.run.failed: execution aborted - error={}", e);
            e
        })
    }

    /// Build and execute without destinations, returning the value.
    pub fn eval<S: AsRef<str>>(&self, args: &[S]) -> Result<OxCValue> {
        let tokens = OxCTokenizer::new(self.config.syntax.clone()).tokenize(args)?;
        self.builder()
            .build_value(tokens)
            .and_then(|root| root.execute())
            .map_err(|e| {
                log::debug!("app.eval.failed: pipeline aborted - error={}", e);
                e
            })
    }

    /// Build only and return the drawn tree.
    pub fn dry_run<S: AsRef<str>>(&self, args: &[S]) -> Result<String> {
        Ok(self.parse(args)?.draw())
    }

    pub fn list(&self) -> String {
        report::list(&self.registry)
    }

    pub fn show(&self, name: &str) -> Result<String> {
        report::detail(name, &self.registry, &self.config.syntax)
    }
}

fn print_schema() -> Result<OxCSchema> {
    OxCSchema::builder(PRINT_OPERATOR)
        .param(OxCParameter::input("input", OxCType::Any).describe("Value to print"))
        .output(OxCOutput::none())
        .describe("Print the input value to the screen")
        .callback(|args| {
            println!("{}", args.value(0)?);
            Ok(OxCValue::Unit)
        })
        .build()
}
