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

//! # Oxchain Tokenizer
//!
//! Classifies raw command-line strings, in order, into tokens. Rules are
//! tried most specific first:
//!
//! 1. the group delimiters (`[` and `]` by default)
//! 2. an operator token: the marker (`-`) followed by a name starting with a
//!    letter or `_`, optionally followed by `,`-separated parameters, e.g.
//!    `-round,2` or `-scale,1,mode=fast`
//! 3. everything else is a literal (`-`, `--flag`, `-3.5`, `out.txt`, ...)
//!
//! The tokenizer never rejects a string outright; it only fails on strings
//! that are clearly operator tokens but whose name or parameter string is
//! malformed, reporting the byte offset inside the token.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::OxCSyntaxConfig;
use crate::errors::{OxError, OxCSpan, Result};

/// One inline parameter of an operator token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OxCParamItem {
    /// Keyword name, `None` for positional items.
    pub key: Option<String>,
    pub value: String,
    /// Byte range of the whole item inside the token text.
    pub span: OxCSpan,
}

impl OxCParamItem {
    pub fn is_keyword(&self) -> bool {
        self.key.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OxCOperatorToken {
    pub text: String,
    pub name: String,
    pub params: Vec<OxCParamItem>,
}

impl OxCOperatorToken {
    pub fn positional(&self) -> impl Iterator<Item = &OxCParamItem> {
        self.params.iter().filter(|p| !p.is_keyword())
    }

    pub fn keywords(&self) -> impl Iterator<Item = &OxCParamItem> {
        self.params.iter().filter(|p| p.is_keyword())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OxCToken {
    Operator(OxCOperatorToken),
    Literal(String),
    LeftGroup(String),
    RightGroup(String),
}

impl OxCToken {
    /// Original text of the argument.
    pub fn text(&self) -> &str {
        match self {
            OxCToken::Operator(op) => &op.text,
            OxCToken::Literal(text) | OxCToken::LeftGroup(text) | OxCToken::RightGroup(text) => text,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, OxCToken::Operator(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, OxCToken::Literal(_))
    }

    pub fn as_operator(&self) -> Option<&OxCOperatorToken> {
        match self {
            OxCToken::Operator(op) => Some(op),
            _ => None,
        }
    }
}

impl fmt::Display for OxCToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Whether `name` is a valid keyword parameter name.
pub fn is_identifier(name: &str) -> bool {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"))
        .is_match(name)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-')
}

#[derive(Clone, Debug, Default)]
pub struct OxCTokenizer {
    syntax: OxCSyntaxConfig,
}

impl OxCTokenizer {
    pub fn new(syntax: OxCSyntaxConfig) -> Self {
        OxCTokenizer { syntax }
    }

    pub fn syntax(&self) -> &OxCSyntaxConfig {
        &self.syntax
    }

    pub fn tokenize<I, S>(&self, args: I) -> Result<Vec<OxCToken>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter()
            .enumerate()
            .map(|(index, arg)| self.classify(index, arg.as_ref()))
            .collect()
    }

    /// Classify a single argument found at position `index`.
    pub fn classify(&self, index: usize, arg: &str) -> Result<OxCToken> {
        if arg == self.syntax.group_open {
            return Ok(OxCToken::LeftGroup(arg.to_string()));
        }
        if arg == self.syntax.group_close {
            return Ok(OxCToken::RightGroup(arg.to_string()));
        }
        if self.looks_like_operator(arg) {
            return self.parse_operator(index, arg).map(OxCToken::Operator);
        }
        Ok(OxCToken::Literal(arg.to_string()))
    }

    fn looks_like_operator(&self, arg: &str) -> bool {
        let mut chars = arg.chars();
        if chars.next() != Some(self.syntax.marker) {
            return false;
        }
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
    }

    fn parse_operator(&self, index: usize, arg: &str) -> Result<OxCOperatorToken> {
        let body_start = self.syntax.marker.len_utf8();
        let body = &arg[body_start..];
        let sep_len = self.syntax.arg_sep.len_utf8();
        let (name, params) = match body.find(self.syntax.arg_sep) {
            Some(pos) => (
                &body[..pos],
                Some((body_start + pos + sep_len, &body[pos + sep_len..])),
            ),
            None => (body, None),
        };

        if let Some((offset, c)) = name.char_indices().find(|(_, c)| !is_name_char(*c)) {
            return Err(OxError::Syntax {
                index,
                token: arg.to_string(),
                offset: body_start + offset,
                message: format!("invalid character `{}` in operator name", c),
            });
        }

        let params = match params {
            Some((offset, string)) => self.split_params(index, arg, offset, string)?,
            None => Vec::new(),
        };

        Ok(OxCOperatorToken {
            text: arg.to_string(),
            name: name.to_string(),
            params,
        })
    }

    fn split_params(
        &self,
        index: usize,
        arg: &str,
        offset: usize,
        string: &str,
    ) -> Result<Vec<OxCParamItem>> {
        let mut items = Vec::new();
        let mut start = offset;
        for raw in string.split(self.syntax.arg_sep) {
            let span = OxCSpan::new(start, start + raw.len());
            start = span.end + self.syntax.arg_sep.len_utf8();
            if raw.is_empty() {
                continue;
            }
            match raw.find(self.syntax.kw_sep) {
                Some(0) => {
                    return Err(OxError::Syntax {
                        index,
                        token: arg.to_string(),
                        offset: span.start,
                        message: "missing keyword name before separator".to_string(),
                    });
                }
                Some(pos) if is_identifier(&raw[..pos]) => items.push(OxCParamItem {
                    key: Some(raw[..pos].to_string()),
                    value: raw[pos + self.syntax.kw_sep.len_utf8()..].to_string(),
                    span,
                }),
                _ => items.push(OxCParamItem {
                    key: None,
                    value: raw.to_string(),
                    span,
                }),
            }
        }
        Ok(items)
    }
}
