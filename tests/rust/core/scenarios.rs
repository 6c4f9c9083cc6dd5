//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Oxchain.
//! The Oxchain project belongs to the Dunimd project team.

use std::sync::{Arc, Mutex};

use oxchain::{
    OxCAstBuilder, OxError, OxCNode, OxCOutput, OxCParameter, OxCRegistry, OxCSchema, OxCTokenizer,
    OxCType, OxCValue,
};

type Routed = Arc<Mutex<Vec<(OxCValue, Vec<String>)>>>;

fn number_registry(routed: &Routed, add_arity: usize) -> OxCRegistry {
    let mut registry = OxCRegistry::new();
    let sink = routed.clone();
    registry
        .register(
            OxCSchema::builder("add")
                .param(OxCParameter::input("a", OxCType::Float))
                .param(OxCParameter::input("b", OxCType::Float))
                .output(OxCOutput::routed(OxCType::Float, add_arity, move |value, dests| {
                    sink.lock().unwrap().push((value.clone(), dests.to_vec()));
                    Ok(())
                }))
                .callback(|args| Ok(OxCValue::Float(args.float(0)? + args.float(1)?)))
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
        .register(
            OxCSchema::builder("mul")
                .param(OxCParameter::config("x", OxCType::Float))
                .param(OxCParameter::config("y", OxCType::Float))
                .output(OxCOutput::value(OxCType::Float))
                .callback(|args| Ok(OxCValue::Float(args.float(0)? * args.float(1)?)))
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
        .register(
            OxCSchema::builder("shout")
                .param(OxCParameter::input("text", OxCType::Text))
                .output(OxCOutput::value(OxCType::Text))
                .callback(|args| Ok(OxCValue::Text(args.text(0)?.to_uppercase())))
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
}

fn tokens(args: &[&str]) -> Vec<oxchain::OxCToken> {
    OxCTokenizer::default().tokenize(args).unwrap()
}

#[test]
fn test_scenario_literal_inputs_routed_to_destination() {
    let routed = Routed::default();
    let registry = number_registry(&routed, 1);
    let root = OxCAstBuilder::new(&registry)
        .build(tokens(&["-add", "1", "2", "dest"]))
        .unwrap();

    match &root.node {
        OxCNode::Composite { op, inputs } => {
            assert_eq!(op.name, "add");
            assert_eq!(inputs.len(), 2);
            assert!(inputs.iter().all(|n| matches!(n, OxCNode::Literal { .. })));
        }
        other => panic!("unexpected node: {:?}", other),
    }

    root.execute().unwrap();
    assert_eq!(
        *routed.lock().unwrap(),
        vec![(OxCValue::Float(3.0), vec!["dest".to_string()])]
    );
}

#[test]
fn test_scenario_nested_operator_with_inline_config() {
    let routed = Routed::default();
    let registry = number_registry(&routed, 1);
    let root = OxCAstBuilder::new(&registry)
        .build(tokens(&["-add", "-mul,2,3", "4", "dest"]))
        .unwrap();

    assert_eq!(root.draw(), "dest [ add [ mul 4 ] ]");
    root.execute().unwrap();
    assert_eq!(
        *routed.lock().unwrap(),
        vec![(OxCValue::Float(10.0), vec!["dest".to_string()])]
    );
}

#[test]
fn test_scenario_short_pipeline_depends_on_output_arity() {
    let routed = Routed::default();

    let registry = number_registry(&routed, 1);
    let err = OxCAstBuilder::new(&registry)
        .build(tokens(&["-add", "1"]))
        .unwrap_err();
    assert!(matches!(err, OxError::MissingOutputDestination { .. }));

    let registry = number_registry(&routed, 0);
    let err = OxCAstBuilder::new(&registry)
        .build(tokens(&["-add", "1"]))
        .unwrap_err();
    assert!(matches!(err, OxError::MissingInputs { .. }));

    assert!(routed.lock().unwrap().is_empty());
}

#[test]
fn test_scenario_chain_type_error_names_both_sides() {
    let routed = Routed::default();
    let registry = number_registry(&routed, 1);
    let err = OxCAstBuilder::new(&registry)
        .build(tokens(&["-add", "-shout", "hi", "1", "dest"]))
        .unwrap_err();

    let text = err.to_string();
    assert!(text.contains("`add`"));
    assert!(text.contains("`shout`"));
    assert!(text.contains("`float`"));
    assert!(text.contains("`text`"));
}

#[test]
fn test_scenario_text_slot_rejects_number_producer() {
    let routed = Routed::default();
    let registry = number_registry(&routed, 1);
    let err = OxCAstBuilder::new(&registry)
        .build_value(tokens(&["-shout", "-mul,1,2"]))
        .unwrap_err();
    assert_eq!(
        err,
        OxError::ChainType {
            index: 0,
            child_index: 1,
            consumer: "shout".to_string(),
            producer: "mul".to_string(),
            expected: "text".to_string(),
            received: "float".to_string(),
        }
    );
}
