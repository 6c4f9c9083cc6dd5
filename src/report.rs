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

//! # Report Module
//!
//! Plain-text rendering for users: error pointers into the original
//! argument list, operator synopses, the operator table and detail pages.

use std::fmt::Write;

use crate::config::OxCSyntaxConfig;
use crate::errors::{OxError, Result};
use crate::registry::OxCRegistry;
use crate::schema::{OxCArity, OxCCategory, OxCSchema};

/// Render `err` with a pointer at the offending token of `args`.
///
/// ```text
///  ... -add -upper x ...
///      ^^^^ ^^^^^^
///
/// operators `add` and `upper` cannot be chained: ...
/// ```
pub fn render_error<S: AsRef<str>>(err: &OxError, args: &[S]) -> String {
    let mut out = String::new();
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

    if let Some(index) = err.token_index().filter(|i| *i < args.len()) {
        let child = match err {
            OxError::ChainType { child_index, .. } if *child_index < args.len() => {
                Some(*child_index)
            }
            _ => None,
        };
        let mut line = String::new();
        let mut marks: Vec<(usize, usize)> = Vec::new();

        if index > 1 {
            push_segment(&mut line, "...");
        }
        if index >= 1 {
            push_segment(&mut line, args[index - 1]);
        }
        let start = push_segment(&mut line, args[index]);
        let token = args[index];
        let mark = match err.span() {
            Some(span) if span.end <= token.len() && !span.is_empty() => (
                start + char_width(token, span.start),
                start + char_width(token, span.end),
            ),
            _ => (start, start + token.chars().count()),
        };
        marks.push(mark);

        if child.is_none() && index + 1 < args.len() {
            push_segment(&mut line, args[index + 1]);
        }
        if index + 2 < args.len() && child.map_or(true, |c| c > index + 1) {
            push_segment(&mut line, "...");
        }
        if let Some(child) = child {
            let start = push_segment(&mut line, args[child]);
            marks.push((start, start + args[child].chars().count()));
            if child + 1 < args.len() {
                push_segment(&mut line, "...");
            }
        }

        let mut underline: Vec<char> = vec![' '; line.chars().count()];
        for (from, to) in marks {
            for slot in underline.iter_mut().take(to).skip(from) {
                *slot = '^';
            }
        }
        let underline: String = underline.into_iter().collect();
        let _ = writeln!(out, "{}", line);
        let _ = writeln!(out, "{}", underline.trim_end());
        out.push('\n');
    }

    out.push_str(&err.to_string());
    out
}

fn push_segment(line: &mut String, text: &str) -> usize {
    line.push(' ');
    let start = line.chars().count();
    line.push_str(text);
    start
}

fn char_width(text: &str, byte_offset: usize) -> usize {
    text.get(..byte_offset)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(byte_offset)
}

/// One-line usage, e.g. `-round[,ndigits] x output`.
pub fn synopsis(name: &str, schema: &OxCSchema, syntax: &OxCSyntaxConfig) -> String {
    let sep = syntax.arg_sep;
    let kw = syntax.kw_sep;
    let mut required_positional = String::new();
    let mut optional_positional = String::new();
    let mut required_keyword = String::new();
    let mut optional_keyword = String::new();
    let mut inputs = Vec::new();

    for p in schema.params() {
        match (p.category(), p.arity()) {
            (OxCCategory::Input, OxCArity::VariadicPositional) => inputs.push(format!("*{}", p.name())),
            (OxCCategory::Input, _) => inputs.push(p.name().to_string()),
            (OxCCategory::Config, OxCArity::Singular) if p.is_required() => {
                let _ = write!(required_positional, "{}{}", sep, p.name());
            }
            (OxCCategory::Config, OxCArity::Singular) => {
                let _ = write!(optional_positional, "{}{}", sep, p.name());
            }
            (OxCCategory::Config, OxCArity::VariadicPositional) => {
                let _ = write!(optional_positional, "{}*{}", sep, p.name());
            }
            (OxCCategory::Config, OxCArity::KeywordSingular) if p.is_required() => {
                let _ = write!(required_keyword, "{}{}{}<val>", sep, p.name(), kw);
            }
            (OxCCategory::Config, OxCArity::KeywordSingular) => {
                let _ = write!(optional_keyword, "{}{}{}<val>", sep, p.name(), kw);
            }
            (OxCCategory::Config, OxCArity::VariadicKeyword) => {
                let _ = write!(optional_keyword, "{}**{}", sep, p.name());
            }
        }
    }

    let mut res = format!("{}{}{}", syntax.marker, name, required_positional);
    if !optional_positional.is_empty() {
        let _ = write!(res, "[{}]", optional_positional);
    }
    res.push_str(&required_keyword);
    if !optional_keyword.is_empty() {
        let _ = write!(res, "[{}]", optional_keyword);
    }
    for input in inputs {
        let _ = write!(res, " {}", input);
    }
    match schema.output().arity() {
        0 => {}
        1 => res.push_str(" output"),
        n => {
            for i in 1..=n {
                let _ = write!(res, " output{}", i);
            }
        }
    }
    res
}

/// Two-column table of operator names and descriptions.
pub fn list(registry: &OxCRegistry) -> String {
    let width = registry
        .names()
        .iter()
        .map(|n| n.chars().count())
        .chain(std::iter::once("Operator".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  Description", "Operator", width = width);
    for (name, schema) in registry.iter() {
        let line = format!(
            "{:<width$}  {}",
            name,
            schema.description().unwrap_or(""),
            width = width
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Detail page for one operator.
pub fn detail(name: &str, registry: &OxCRegistry, syntax: &OxCSyntaxConfig) -> Result<String> {
    let schema = registry.get(name).ok_or_else(|| OxError::OperatorNotFound {
        index: 0,
        name: name.to_string(),
    })?;

    let mut out = String::new();
    let _ = writeln!(out, "Synopsis\n  {}", synopsis(name, &schema, syntax));
    if let Some(description) = schema.description() {
        let _ = writeln!(out, "\nDescription\n  {}", description);
    }

    let sections = [
        ("Inputs", OxCCategory::Input, false),
        ("Positional Arguments", OxCCategory::Config, false),
        ("Keyword Arguments", OxCCategory::Config, true),
    ];
    for (title, category, keyword) in sections {
        let params: Vec<_> = schema
            .params()
            .iter()
            .filter(|p| p.category() == category && p.arity().is_keyword() == keyword)
            .collect();
        if params.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}", title);
        for p in params {
            let mut line = format!(
                "  {:<12} {:<8} {:<8} {}",
                p.name(),
                p.ty().to_string(),
                if p.is_required() { "Required" } else { "Optional" },
                p.description().unwrap_or("")
            );
            if let Some(default) = p.default_value() {
                let _ = write!(line, " (default: {})", default);
            }
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }

    let output = match schema.output().ty() {
        Some(ty) => format!("{}, {} destination(s)", ty, schema.output().arity()),
        None => "none".to_string(),
    };
    let _ = writeln!(out, "\nOutput\n  {}", output);
    Ok(out)
}
