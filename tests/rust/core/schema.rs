//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Oxchain.
//! The Oxchain project belongs to the Dunimd project team.

use oxchain::{OxError, OxCOutput, OxCParameter, OxCRegistry, OxCSchema, OxCSchemaBuilder, OxCType, OxCValue};

fn noop(name: &str) -> OxCSchemaBuilder {
    OxCSchema::builder(name).callback(|_| Ok(OxCValue::Unit))
}

fn assert_registration_error(result: oxchain::Result<OxCSchema>) {
    match result {
        Err(OxError::Registration { .. }) => {}
        other => panic!("expected registration error, got {:?}", other),
    }
}

#[test]
fn test_schema_positional_iteration_keeps_declared_order() {
    let schema = noop("mix")
        .param(OxCParameter::config("scale", OxCType::Float))
        .param(OxCParameter::input("x", OxCType::Float))
        .param(OxCParameter::config("offset", OxCType::Float).default(0.0))
        .param(OxCParameter::input("y", OxCType::Float))
        .param(OxCParameter::keyword("mode", OxCType::Text).default("fast"))
        .build()
        .unwrap();

    let positional: Vec<_> = schema.iter_positional().map(|p| p.name()).collect();
    assert_eq!(positional, vec!["scale", "x", "offset", "y"]);

    let inputs: Vec<_> = schema.iter_inputs().map(|p| p.name()).collect();
    assert_eq!(inputs, vec!["x", "y"]);

    let config: Vec<_> = schema.iter_positional_config().map(|p| p.name()).collect();
    assert_eq!(config, vec!["scale", "offset"]);

    assert_eq!(schema.min_inputs(), 2);
    assert_eq!(schema.required_positional_count(), 1);
    assert_eq!(schema.max_positional_count(), Some(2));
    assert!(schema.required_keywords().is_empty());
}

#[test]
fn test_schema_variadic_config_repeats() {
    let schema = noop("pick")
        .param(OxCParameter::config("first", OxCType::Int))
        .param(OxCParameter::configs("rest", OxCType::Int))
        .build()
        .unwrap();

    let names: Vec<_> = schema.iter_positional_config().take(3).map(|p| p.name()).collect();
    assert_eq!(names, vec!["first", "rest", "rest"]);
    assert_eq!(schema.max_positional_count(), None);
    assert!(!schema.has_inputs());
}

#[test]
fn test_schema_keyword_lookup() {
    let schema = noop("plain")
        .param(OxCParameter::keyword("mode", OxCType::Text))
        .build()
        .unwrap();
    assert!(schema.keyword("mode").is_some());
    assert!(schema.keyword("other").is_none());
    assert_eq!(schema.required_keywords(), vec!["mode"]);
}

#[test]
fn test_schema_registration_failures() {
    assert_registration_error(
        noop("a")
            .param(OxCParameter::input("x", OxCType::Int).default(1i64))
            .build(),
    );
    assert_registration_error(
        noop("b")
            .param(OxCParameter::keywords("x", OxCType::Any))
            .param(OxCParameter::keywords("y", OxCType::Any))
            .build(),
    );
    assert_registration_error(
        noop("c")
            .param(OxCParameter::inputs("x", OxCType::Int))
            .param(OxCParameter::input("y", OxCType::Int))
            .build(),
    );
    assert_registration_error(
        noop("d")
            .param(OxCParameter::keywords("k", OxCType::Any))
            .param(OxCParameter::keyword("mode", OxCType::Text))
            .build(),
    );
    assert_registration_error(
        noop("e")
            .param(OxCParameter::input("x", OxCType::Int))
            .param(OxCParameter::input("x", OxCType::Int))
            .build(),
    );
    assert_registration_error(
        OxCSchema::builder("f")
            .param(OxCParameter::input("x", OxCType::Int))
            .build(),
    );
    assert_registration_error(
        noop("g")
            .output(OxCOutput::none())
            .param(OxCParameter::input("x", OxCType::Int))
            .param(OxCParameter::keyword("k", OxCType::Int))
            .param(OxCParameter::input("y", OxCType::Int))
            .build(),
    );
}

#[test]
fn test_schema_output_root_eligibility() {
    assert!(OxCOutput::none().is_root_eligible());
    assert!(!OxCOutput::value(OxCType::Int).is_root_eligible());
    assert!(OxCOutput::routed(OxCType::Int, 1, |_, _| Ok(())).is_root_eligible());
}

#[test]
fn test_registry_rejects_duplicates() {
    let mut registry = OxCRegistry::new();
    registry.register(noop("echo").build().unwrap()).unwrap();

    let err = registry.register(noop("echo").build().unwrap()).unwrap_err();
    assert!(matches!(err, OxError::Registration { ref name, .. } if name == "echo"));
    assert_eq!(registry.names(), vec!["echo"]);
    assert!(registry.get("missing").is_none());
}
