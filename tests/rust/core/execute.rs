//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Oxchain.
//! The Oxchain project belongs to the Dunimd project team.

use std::sync::{Arc, Mutex};

use oxchain::{
    check, OxCAstBuilder, OxError, OxCOutput, OxCParameter, OxCPhase, OxCRegistry, OxCRoot, OxCSchema,
    OxCTokenizer, OxCType, OxCValue,
};

type Calls = Arc<Mutex<Vec<String>>>;
type Routed = Arc<Mutex<Vec<(OxCValue, Vec<String>)>>>;

fn registry(calls: &Calls, routed: &Routed) -> OxCRegistry {
    let mut registry = OxCRegistry::new();

    let tag_calls = calls.clone();
    registry
        .register(
            OxCSchema::builder("tag")
                .param(OxCParameter::config("name", OxCType::Text))
                .output(OxCOutput::value(OxCType::Text))
                .callback(move |args| {
                    let name = args.text(0)?.to_string();
                    tag_calls.lock().unwrap().push(name.clone());
                    Ok(OxCValue::Text(name))
                })
                .build()
                .unwrap(),
        )
        .unwrap();

    let join_calls = calls.clone();
    let join_routed = routed.clone();
    registry
        .register(
            OxCSchema::builder("join")
                .param(OxCParameter::inputs("parts", OxCType::Text))
                .output(OxCOutput::routed(OxCType::Text, 1, move |value, dests| {
                    join_routed
                        .lock()
                        .unwrap()
                        .push((value.clone(), dests.to_vec()));
                    Ok(())
                }))
                .callback(move |args| {
                    join_calls.lock().unwrap().push("join".to_string());
                    let parts: Vec<String> = args.rest(0).iter().map(ToString::to_string).collect();
                    Ok(OxCValue::Text(parts.concat()))
                })
                .build()
                .unwrap(),
        )
        .unwrap();

    let schemas = vec![
        OxCSchema::builder("mix")
            .param(OxCParameter::input("a", OxCType::Int))
            .param(OxCParameter::config("k", OxCType::Int))
            .param(OxCParameter::input("b", OxCType::Int))
            .param(OxCParameter::config("m", OxCType::Int).default(10i64))
            .param(OxCParameter::keyword("mode", OxCType::Text).default("fast"))
            .param(OxCParameter::keywords("extra", OxCType::Any))
            .output(OxCOutput::value(OxCType::List))
            .callback(|args| {
                let mut items = args.positional.clone();
                for (key, value) in &args.keywords {
                    items.push(OxCValue::Text(format!("{}={}", key, value)));
                }
                Ok(OxCValue::List(items))
            }),
        OxCSchema::builder("digits")
            .param(OxCParameter::inputs("values", OxCType::Int))
            .output(OxCOutput::value(OxCType::List))
            .delegate(true)
            .callback(|args| Ok(OxCValue::List(args.positional.clone()))),
        OxCSchema::builder("late")
            .param(OxCParameter::input("n", OxCType::Int).core_phase(OxCPhase::Execute))
            .output(OxCOutput::value(OxCType::Int))
            .callback(|args| Ok(OxCValue::Int(args.int(0)? + 1))),
        OxCSchema::builder("positive")
            .param(OxCParameter::config("x", OxCType::Float).execute_check(check(|v| {
                match v.as_float() {
                    Some(x) if x > 0.0 => Ok(v),
                    _ => Err("must be positive".to_string()),
                }
            })))
            .output(OxCOutput::value(OxCType::Float))
            .callback(|args| Ok(OxCValue::Float(args.float(0)?))),
        OxCSchema::builder("boom")
            .output(OxCOutput::value(OxCType::Text))
            .callback(|_| Err(OxError::Internal("engine exploded".to_string()))),
        OxCSchema::builder("liar")
            .output(OxCOutput::value(OxCType::Int))
            .callback(|_| Ok(OxCValue::from("not a number"))),
        OxCSchema::builder("chatty")
            .output(OxCOutput::none())
            .callback(|_| Ok(OxCValue::Int(1))),
        OxCSchema::builder("quiet")
            .param(OxCParameter::input("x", OxCType::Any))
            .output(OxCOutput::none())
            .callback(|_| Ok(OxCValue::Unit)),
        OxCSchema::builder("stay")
            .param(OxCParameter::input("x", OxCType::Float))
            .output(OxCOutput::routed(OxCType::Float, 0, |_, _| {
                Err(OxError::Internal("router must not run".to_string()))
            }))
            .callback(|args| Ok(OxCValue::Float(args.float(0)?))),
        OxCSchema::builder("broken")
            .param(OxCParameter::input("x", OxCType::Float))
            .output(OxCOutput::routed(OxCType::Float, 1, |_, dests| {
                Err(OxError::callback_failure(format!("cannot open `{}`", dests[0])))
            }))
            .callback(|args| Ok(OxCValue::Float(args.float(0)?))),
    ];
    for schema in schemas {
        registry.register(schema.build().unwrap()).unwrap();
    }
    registry
}

struct Harness {
    calls: Calls,
    routed: Routed,
    registry: OxCRegistry,
}

impl Harness {
    fn new() -> Self {
        let calls = Calls::default();
        let routed = Routed::default();
        let registry = registry(&calls, &routed);
        Harness { calls, routed, registry }
    }

    fn build(&self, args: &[&str]) -> OxCRoot {
        let tokens = OxCTokenizer::default().tokenize(args).unwrap();
        OxCAstBuilder::new(&self.registry).build(tokens).unwrap()
    }

    fn eval(&self, args: &[&str]) -> oxchain::Result<OxCValue> {
        let tokens = OxCTokenizer::default().tokenize(args).unwrap();
        OxCAstBuilder::new(&self.registry).build_value(tokens)?.execute()
    }
}

#[test]
fn test_execute_children_left_to_right() {
    let h = Harness::new();
    let value = h.eval(&["-join", "-tag,a", "-tag,b", "x", "-tag,c"]).unwrap();

    assert_eq!(value, OxCValue::from("abxc"));
    assert_eq!(*h.calls.lock().unwrap(), vec!["a", "b", "c", "join"]);
}

#[test]
fn test_execute_interleaves_inputs_and_config() {
    let h = Harness::new();
    let value = h.eval(&["-mix,5", "1", "2"]).unwrap();
    assert_eq!(
        value,
        OxCValue::List(vec![
            OxCValue::Int(1),
            OxCValue::Int(5),
            OxCValue::Int(2),
            OxCValue::Int(10),
            OxCValue::from("mode=fast"),
        ])
    );

    let value = h.eval(&["-mix,5,6,mode=slow,color=red", "1", "2"]).unwrap();
    assert_eq!(
        value,
        OxCValue::List(vec![
            OxCValue::Int(1),
            OxCValue::Int(5),
            OxCValue::Int(2),
            OxCValue::Int(6),
            OxCValue::from("color=red"),
            OxCValue::from("mode=slow"),
        ])
    );
}

#[test]
fn test_execute_phase_validation() {
    let h = Harness::new();
    assert_eq!(h.eval(&["-late", "41"]).unwrap(), OxCValue::Int(42));

    let err = h.eval(&["-late", "abc"]).unwrap_err();
    assert!(matches!(
        err,
        OxError::ExecuteValidation { index: 0, ref parameter, .. } if parameter == "n"
    ));

    assert_eq!(h.eval(&["-positive,2"]).unwrap(), OxCValue::Float(2.0));
    let err = h.eval(&["-positive,-2"]).unwrap_err();
    assert!(matches!(
        err,
        OxError::ExecuteValidation { ref cause, .. } if cause == "must be positive"
    ));
}

#[test]
fn test_execute_callback_errors_are_attributed() {
    let h = Harness::new();
    let err = h.eval(&["-join", "a", "-boom"]).unwrap_err();
    match err {
        OxError::Callback { index, operator, message } => {
            assert_eq!(index, 2);
            assert_eq!(operator, "boom");
            assert!(message.contains("engine exploded"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(h.calls.lock().unwrap().is_empty());
}

#[test]
fn test_execute_return_value_validation() {
    let h = Harness::new();
    let err = h.eval(&["-liar"]).unwrap_err();
    assert!(matches!(
        err,
        OxError::ExecuteValidation { ref operator, ref parameter, .. }
            if operator == "liar" && parameter == "return"
    ));

    let err = h.eval(&["-chatty"]).unwrap_err();
    assert!(matches!(err, OxError::ExecuteValidation { .. }));
}

#[test]
fn test_execute_routes_root_value() {
    let h = Harness::new();
    let root = h.build(&["-join", "a", "b", "out.txt"]);

    assert_eq!(root.execute().unwrap(), OxCValue::Unit);
    assert_eq!(
        *h.routed.lock().unwrap(),
        vec![(OxCValue::from("ab"), vec!["out.txt".to_string()])]
    );
}

#[test]
fn test_execute_embedded_returns_raw_value() {
    let h = Harness::new();
    assert_eq!(h.eval(&["-join", "a", "b"]).unwrap(), OxCValue::from("ab"));
    assert!(h.routed.lock().unwrap().is_empty());
}

#[test]
fn test_execute_zero_arity_router_is_skipped() {
    let h = Harness::new();
    let root = h.build(&["-stay", "1.5"]);
    assert!(root.destinations.is_empty());
    assert_eq!(root.execute().unwrap(), OxCValue::Float(1.5));
}

#[test]
fn test_execute_output_less_root() {
    let h = Harness::new();
    let root = h.build(&["-quiet", "-tag,x"]);
    assert_eq!(root.execute().unwrap(), OxCValue::Unit);
    assert_eq!(*h.calls.lock().unwrap(), vec!["x"]);
}

#[test]
fn test_execute_router_failure() {
    let h = Harness::new();
    let root = h.build(&["-broken", "1", "nowhere"]);
    let err = root.execute().unwrap_err();
    assert!(matches!(
        err,
        OxError::Routing { ref operator, ref message } if operator == "broken" && message.contains("nowhere")
    ));
}

#[test]
fn test_execute_delegate_receives_raw_text() {
    let h = Harness::new();
    let value = h.eval(&["-digits", "007", "+5"]).unwrap();
    assert_eq!(
        value,
        OxCValue::List(vec![OxCValue::from("007"), OxCValue::from("+5")])
    );

    let err = h.eval(&["-digits", "7", "x"]).unwrap_err();
    assert!(matches!(
        err,
        OxError::BuildValidation { index: 2, ref parameter, .. } if parameter == "values"
    ));
}
