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

//! # Calculator Operators
//!
//! Small operator set used by the `oxcalc` binary and the integration
//! tests. Every value-producing operator can be the root of a pipeline and
//! writes its result to one destination: `-` is stdout, anything else is a
//! file path.
//!
//! ```text
//! oxcalc -round,2 -div 10 3 -          # 3.33
//! oxcalc -sum [ 1 2 -neg 3 ] total.txt # writes 0
//! oxcalc -fmt,{}%,precision=1 -mul 0.5 100 -
//! ```

use std::fs;

use crate::app::OxCApp;
use crate::errors::{OxError, Result};
use crate::schema::{OxCArgs, OxCOutput, OxCParameter, OxCSchema};
use crate::value::{OxCType, OxCValue};

/// Write `value` to each destination; `-` is stdout.
pub fn write_value(value: &OxCValue, destinations: &[String]) -> Result<()> {
    for dest in destinations {
        if dest == "-" {
            println!("{}", value);
        } else {
            fs::write(dest, format!("{}\n", value))?;
            log::debug!("calc.output.write: value written - path={}", dest);
        }
    }
    Ok(())
}

fn routed(ty: OxCType) -> OxCOutput {
    OxCOutput::routed(ty, 1, write_value)
}

fn binary<F>(name: &str, description: &str, f: F) -> Result<OxCSchema>
where
    F: Fn(f64, f64) -> Result<f64> + Send + Sync + 'static,
{
    OxCSchema::builder(name)
        .param(OxCParameter::input("a", OxCType::Float))
        .param(OxCParameter::input("b", OxCType::Float))
        .output(routed(OxCType::Float))
        .describe(description)
        .callback(move |args| Ok(OxCValue::Float(f(args.float(0)?, args.float(1)?)?)))
        .build()
}

fn round_to(x: f64, ndigits: i64) -> f64 {
    let factor = 10f64.powi(ndigits.clamp(-15, 15) as i32);
    (x * factor).round() / factor
}

fn format_value(args: &OxCArgs) -> Result<OxCValue> {
    let x = args.float(0)?;
    let template = args.text(1)?;
    let precision = args
        .keyword("precision")
        .and_then(OxCValue::as_int)
        .unwrap_or(2)
        .clamp(0, 17) as usize;
    let number = format!("{:.*}", precision, x);
    if template.contains("{}") {
        Ok(OxCValue::Text(template.replacen("{}", &number, 1)))
    } else {
        Ok(OxCValue::Text(format!("{}{}", template, number)))
    }
}

/// All calculator schemas.
pub fn operators() -> Result<Vec<OxCSchema>> {
    Ok(vec![
        binary("add", "Add two numbers", |a, b| Ok(a + b))?,
        binary("sub", "Subtract the second number from the first", |a, b| Ok(a - b))?,
        binary("mul", "Multiply two numbers", |a, b| Ok(a * b))?,
        binary("div", "Divide the first number by the second", |a, b| {
            if b == 0.0 {
                Err(OxError::callback_failure("division by zero"))
            } else {
                Ok(a / b)
            }
        })?,
        OxCSchema::builder("sum")
            .param(OxCParameter::inputs("values", OxCType::Float))
            .output(routed(OxCType::Float))
            .describe("Sum any number of values")
            .callback(|args| {
                let mut total = 0.0;
                for i in 0..args.len() {
                    total += args.float(i)?;
                }
                Ok(OxCValue::Float(total))
            })
            .build()?,
        OxCSchema::builder("pow")
            .param(OxCParameter::input("x", OxCType::Float))
            .param(OxCParameter::config("exponent", OxCType::Float).describe("Power to raise to"))
            .output(routed(OxCType::Float))
            .describe("Raise a number to a power")
            .callback(|args| Ok(OxCValue::Float(args.float(0)?.powf(args.float(1)?))))
            .build()?,
        OxCSchema::builder("round")
            .param(OxCParameter::input("x", OxCType::Float))
            .param(
                OxCParameter::config("ndigits", OxCType::Int)
                    .default(OxCValue::Int(0))
                    .describe("Digits after the decimal point"),
            )
            .output(routed(OxCType::Float))
            .describe("Round a number")
            .callback(|args| Ok(OxCValue::Float(round_to(args.float(0)?, args.int(1)?))))
            .build()?,
        OxCSchema::builder("const")
            .param(OxCParameter::config("value", OxCType::Float).describe("The constant"))
            .output(routed(OxCType::Float))
            .describe("Produce a constant")
            .callback(|args| Ok(OxCValue::Float(args.float(0)?)))
            .build()?,
        OxCSchema::builder("neg")
            .param(OxCParameter::input("x", OxCType::Float))
            .output(routed(OxCType::Float))
            .describe("Negate a number")
            .callback(|args| Ok(OxCValue::Float(-args.float(0)?)))
            .build()?,
        OxCSchema::builder("fmt")
            .param(OxCParameter::input("x", OxCType::Float))
            .param(OxCParameter::config("template", OxCType::Text).describe("Text with a `{}` placeholder"))
            .param(
                OxCParameter::keyword("precision", OxCType::Int)
                    .default(OxCValue::Int(2))
                    .describe("Digits after the decimal point"),
            )
            .output(routed(OxCType::Text))
            .describe("Format a number as text")
            .callback(format_value)
            .build()?,
        OxCSchema::builder("len")
            .param(OxCParameter::input("text", OxCType::Text))
            .output(routed(OxCType::Int))
            .describe("Count the characters of a text")
            .callback(|args| Ok(OxCValue::Int(args.text(0)?.chars().count() as i64)))
            .build()?,
        OxCSchema::builder("words")
            .param(OxCParameter::inputs("words", OxCType::Text))
            .output(routed(OxCType::Text))
            .delegate(true)
            .describe("Join the raw arguments with spaces")
            .callback(|args| {
                let words: Vec<String> = args.rest(0).iter().map(ToString::to_string).collect();
                Ok(OxCValue::Text(words.join(" ")))
            })
            .build()?,
        OxCSchema::builder("read")
            .param(OxCParameter::input("path", OxCType::Text))
            .output(routed(OxCType::Text))
            .describe("Read a text file")
            .callback(|args| {
                let text = fs::read_to_string(args.text(0)?)?;
                Ok(OxCValue::Text(text.trim_end().to_string()))
            })
            .build()?,
    ])
}

/// Register every calculator operator on `app`.
pub fn install(app: &mut OxCApp) -> Result<()> {
    for schema in operators()? {
        app.register(schema)?;
    }
    log::debug!(
        "calc.install: calculator operators registered - total={}",
        app.registry().len()
    );
    Ok(())
}
