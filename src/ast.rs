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

//! # Expression Tree
//!
//! Nodes produced by the AST builder. A tree is built once, bottom-up, and
//! evaluated once; nothing in it is mutated after construction. Evaluation
//! lives in [`crate::engine`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::schema::OxCSchema;
use crate::value::{OxCType, OxCValue};

/// An operator occurrence with its inline config values.
#[derive(Clone, Debug)]
pub struct OxCInvocation {
    pub name: String,
    /// Token index of the operator token.
    pub index: usize,
    pub schema: Arc<OxCSchema>,
    /// Positional config values in declared order, build-phase validated.
    pub args: Vec<OxCValue>,
    pub kwargs: BTreeMap<String, OxCValue>,
}

impl OxCInvocation {
    pub fn output_type(&self) -> Option<&OxCType> {
        self.schema.output().ty()
    }
}

#[derive(Clone, Debug)]
pub enum OxCNode {
    /// A literal token standing in for an input slot.
    Literal {
        index: usize,
        text: String,
        value: OxCValue,
    },
    /// Operator without input slots.
    Leaf(OxCInvocation),
    /// Operator whose input slots are filled by child nodes.
    Composite {
        op: OxCInvocation,
        inputs: Vec<OxCNode>,
    },
    /// Operator receiving its inputs as raw token text, kept verbatim.
    Delegate { op: OxCInvocation, raw: Vec<String> },
}

impl OxCNode {
    pub fn invocation(&self) -> Option<&OxCInvocation> {
        match self {
            OxCNode::Literal { .. } => None,
            OxCNode::Leaf(op) | OxCNode::Composite { op, .. } | OxCNode::Delegate { op, .. } => {
                Some(op)
            }
        }
    }

    /// Declared output type; `None` for literals and output-less operators.
    pub fn output_type(&self) -> Option<&OxCType> {
        self.invocation().and_then(OxCInvocation::output_type)
    }

    /// Compact one-line rendering, e.g. `add [ mul [ 2 3 ] 4 ]`.
    pub fn draw(&self) -> String {
        match self {
            OxCNode::Literal { text, .. } => text.clone(),
            OxCNode::Leaf(op) => op.name.clone(),
            OxCNode::Composite { op, inputs } => {
                let mut res = format!("{} [ ", op.name);
                for input in inputs {
                    res.push_str(&input.draw());
                    res.push(' ');
                }
                res.push(']');
                res
            }
            OxCNode::Delegate { op, raw, .. } => {
                let mut res = format!("{} [ ", op.name);
                if !raw.is_empty() {
                    res.push_str(&raw.join(" "));
                    res.push(' ');
                }
                res.push(']');
                res
            }
        }
    }
}

/// Top of a built pipeline: the root node and its destinations.
#[derive(Clone, Debug)]
pub struct OxCRoot {
    pub node: OxCNode,
    pub destinations: Vec<String>,
    /// When set, `execute` returns the raw value and never routes.
    pub return_value: bool,
}

impl OxCRoot {
    pub fn new(node: OxCNode, destinations: Vec<String>) -> Self {
        OxCRoot {
            node,
            destinations,
            return_value: false,
        }
    }

    /// Root that returns its value to the caller instead of routing it.
    pub fn embedded(node: OxCNode) -> Self {
        OxCRoot {
            node,
            destinations: Vec::new(),
            return_value: true,
        }
    }

    pub fn output_type(&self) -> Option<&OxCType> {
        self.node.output_type()
    }

    pub fn draw(&self) -> String {
        let mut res = self.destinations.join(",");
        if !res.is_empty() {
            res.push(' ');
        }
        res.push_str(&format!("[ {} ]", self.node.draw()));
        res
    }
}

impl fmt::Display for OxCRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.draw())
    }
}
