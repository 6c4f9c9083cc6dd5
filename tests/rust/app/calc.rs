//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Oxchain.
//! The Oxchain project belongs to the Dunimd project team.

use std::fs;
use std::io::Write;

use oxchain::app::OxCApp;
use oxchain::calc;
use oxchain::config::OxCConfig;
use oxchain::report;
use oxchain::{OxError, OxCMapResolver, OxCOutput, OxCParameter, OxCSchema, OxCType, OxCValue};

fn calculator(config: OxCConfig) -> OxCApp {
    let mut app = OxCApp::new(config).unwrap();
    calc::install(&mut app).unwrap();
    app
}

#[test]
fn test_calc_eval_nested_pipelines() {
    let app = calculator(OxCConfig::default());

    assert_eq!(app.eval(&["-round,2", "-div", "10", "3"]).unwrap(), OxCValue::Float(3.33));
    assert_eq!(
        app.eval(&["-sum", "[", "1", "2", "-neg", "3", "]"]).unwrap(),
        OxCValue::Float(0.0)
    );
    assert_eq!(
        app.eval(&["-fmt,{}%,precision=1", "-mul", "0.5", "100"]).unwrap(),
        OxCValue::from("50.0%")
    );
    assert_eq!(
        app.eval(&["-words", "a", "-b", "c"]).unwrap(),
        OxCValue::from("a -b c")
    );
}

#[test]
fn test_calc_run_writes_destination_file() {
    let app = calculator(OxCConfig::default());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("total.txt");
    let dest = path.to_str().unwrap();

    let value = app.run(&["-add", "-pow,2", "3", "1", dest]).unwrap();
    assert_eq!(value, OxCValue::Unit);
    assert_eq!(fs::read_to_string(&path).unwrap(), "10\n");
}

#[test]
fn test_calc_reads_input_file() {
    let app = calculator(OxCConfig::default());
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "hello world").unwrap();
    let source = file.path().to_str().unwrap();

    assert_eq!(app.eval(&["-len", "-read", source]).unwrap(), OxCValue::Int(11));
}

#[test]
fn test_calc_division_by_zero() {
    let app = calculator(OxCConfig::default());
    let err = app.eval(&["-neg", "-div", "1", "0"]).unwrap_err();
    assert_eq!(
        err,
        OxError::Callback {
            index: 1,
            operator: "div".to_string(),
            message: "division by zero".to_string(),
        }
    );
}

#[test]
fn test_calc_print_root() {
    let app = calculator(OxCConfig::default());
    assert_eq!(app.run(&["-print", "-add", "1", "2"]).unwrap(), OxCValue::Unit);
}

#[test]
fn test_calc_dry_run_draws_tree() {
    let app = calculator(OxCConfig::default());
    let tree = app.dry_run(&["-add", "-neg", "1", "2", "-"]).unwrap();
    assert_eq!(tree, "- [ add [ neg [ 1 ] 2 ] ]");
}

#[test]
fn test_calc_list_and_show() {
    let app = calculator(OxCConfig::default());

    let table = app.list();
    assert!(table.starts_with("Operator"));
    assert!(table.contains("Round a number"));
    assert!(table.lines().any(|l| l.starts_with("print ")));

    let page = app.show("round").unwrap();
    assert!(page.contains("Synopsis\n  -round[,ndigits] x output"));
    assert!(page.contains("(default: 0)"));

    let page = app.show("fmt").unwrap();
    assert!(page.contains("-fmt,template[,precision=<val>] x output"));
    assert!(page.contains("Keyword Arguments"));

    let page = app.show("sum").unwrap();
    assert!(page.contains("-sum *values output"));

    assert!(matches!(
        app.show("nope").unwrap_err(),
        OxError::OperatorNotFound { .. }
    ));
}

#[test]
fn test_calc_config_file_changes_syntax() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(file, "syntax:\n  marker: '+'\n  arg_sep: ';'\n").unwrap();

    let config = OxCConfig::from_file(file.path()).unwrap();
    let app = calculator(config);
    assert_eq!(app.eval(&["+pow;2", "3"]).unwrap(), OxCValue::Float(9.0));
    assert_eq!(app.eval(&["+neg", "-3"]).unwrap(), OxCValue::Float(3.0));
}

#[test]
fn test_calc_strict_literals() {
    let app = calculator(OxCConfig::default().strict_literals(true));
    let err = app.eval(&["-add", "1", "2"]).unwrap_err();
    assert!(matches!(err, OxError::BuildValidation { index: 1, .. }));

    let mut app = app;
    app.register(
        OxCSchema::builder("half")
            .param(OxCParameter::input("x", OxCType::Float).strict(false))
            .output(OxCOutput::value(OxCType::Float))
            .callback(|args| Ok(OxCValue::Float(args.float(0)? / 2.0)))
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(app.eval(&["-half", "1"]).unwrap(), OxCValue::Float(0.5));
}

#[test]
fn test_calc_external_operator_resolver() {
    let mut resolver = OxCMapResolver::with_default_pattern().unwrap();
    resolver.insert(
        OxCSchema::builder("twice.ox")
            .param(OxCParameter::input("x", OxCType::Float))
            .output(OxCOutput::value(OxCType::Float))
            .callback(|args| Ok(OxCValue::Float(args.float(0)? * 2.0)))
            .build()
            .unwrap(),
    );
    let app = calculator(OxCConfig::default()).with_resolver(Box::new(resolver));

    assert_eq!(app.eval(&["-neg", "-twice.ox", "4"]).unwrap(), OxCValue::Float(-8.0));
    assert!(matches!(
        app.eval(&["-neg", "-thrice.ox", "4"]).unwrap_err(),
        OxError::Resolver { index: 1, .. }
    ));
}

#[test]
fn test_calc_render_chain_error() {
    let app = calculator(OxCConfig::default());
    let args = ["-add", "-len", "x", "1", "-"];
    let err = app.run(&args).unwrap_err();
    assert!(matches!(err, OxError::ChainType { .. }));

    let text = report::render_error(&err, &args);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], " -add -len ...");
    assert_eq!(lines[1], " ^^^^ ^^^^");
    assert_eq!(lines[2], "");
    assert!(lines[3].contains("`add` and `len`"));
}
