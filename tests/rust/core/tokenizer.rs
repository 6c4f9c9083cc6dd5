//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Oxchain.
//! The Oxchain project belongs to the Dunimd project team.

use oxchain::{OxError, OxCSyntaxConfig, OxCToken, OxCTokenizer};
use proptest::prelude::*;

fn kinds(tokens: &[OxCToken]) -> Vec<&'static str> {
    tokens
        .iter()
        .map(|t| match t {
            OxCToken::Operator(_) => "op",
            OxCToken::Literal(_) => "lit",
            OxCToken::LeftGroup(_) => "[",
            OxCToken::RightGroup(_) => "]",
        })
        .collect()
}

#[test]
fn test_tokenizer_classification_priority() {
    let tokenizer = OxCTokenizer::default();
    let tokens = tokenizer
        .tokenize(["-sum", "[", "-round,2", "1", "-3", "--x", "-", "]", "out.txt"])
        .unwrap();

    assert_eq!(
        kinds(&tokens),
        vec!["op", "[", "op", "lit", "lit", "lit", "lit", "]", "lit"]
    );
    assert_eq!(tokens[2].as_operator().unwrap().name, "round");
    assert_eq!(tokens[4].text(), "-3");
}

#[test]
fn test_tokenizer_keyword_and_positional_items() {
    let tokenizer = OxCTokenizer::default();

    let token = tokenizer.classify(0, "-fmt,{}%,precision=1").unwrap();
    let op = token.as_operator().unwrap();
    assert_eq!(op.name, "fmt");
    let positional: Vec<_> = op.positional().map(|p| p.value.as_str()).collect();
    assert_eq!(positional, vec!["{}%"]);
    let keyword = op.keywords().next().unwrap();
    assert_eq!(keyword.key.as_deref(), Some("precision"));
    assert_eq!(keyword.value, "1");

    let token = tokenizer.classify(0, "-op,a=b=c,1=2").unwrap();
    let op = token.as_operator().unwrap();
    assert_eq!(op.params[0].key.as_deref(), Some("a"));
    assert_eq!(op.params[0].value, "b=c");
    assert_eq!(op.params[1].key, None);
    assert_eq!(op.params[1].value, "1=2");
}

#[test]
fn test_tokenizer_operator_name_may_contain_path_characters() {
    let tokenizer = OxCTokenizer::default();
    let token = tokenizer.classify(0, "-lib/scale.ox,2").unwrap();
    assert_eq!(token.as_operator().unwrap().name, "lib/scale.ox");
}

#[test]
fn test_tokenizer_invalid_name_character() {
    let tokenizer = OxCTokenizer::default();
    let err = tokenizer.tokenize(["-add", "-ad@d"]).unwrap_err();

    match err {
        OxError::Syntax {
            index,
            token,
            offset,
            ..
        } => {
            assert_eq!(index, 1);
            assert_eq!(token, "-ad@d");
            assert_eq!(offset, 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_tokenizer_empty_keyword_name() {
    let tokenizer = OxCTokenizer::default();
    let err = tokenizer.classify(2, "-op,=5").unwrap_err();
    assert_eq!(err.token_index(), Some(2));
    assert!(matches!(err, OxError::Syntax { offset: 4, .. }));
}

#[test]
fn test_tokenizer_custom_syntax() {
    let syntax = OxCSyntaxConfig {
        marker: '+',
        arg_sep: ':',
        group_open: "(".to_string(),
        group_close: ")".to_string(),
        ..OxCSyntaxConfig::default()
    };
    let tokenizer = OxCTokenizer::new(syntax);
    let tokens = tokenizer.tokenize(["+round:2", "(", "-add", ")"]).unwrap();

    assert_eq!(kinds(&tokens), vec!["op", "[", "lit", "]"]);
    let op = tokens[0].as_operator().unwrap();
    assert_eq!(op.name, "round");
    assert_eq!(op.params[0].value, "2");
}

proptest! {
    #[test]
    fn test_tokenizer_plain_strings_stay_literal(text in "[a-zA-Z0-9_./ ]{0,16}") {
        let tokenizer = OxCTokenizer::default();
        let tokens = tokenizer.tokenize([text.as_str()]).unwrap();
        prop_assert_eq!(tokens, vec![OxCToken::Literal(text.clone())]);
    }

    #[test]
    fn test_tokenizer_numbers_are_never_operators(x in proptest::num::f64::NORMAL) {
        let tokenizer = OxCTokenizer::default();
        let text = x.to_string();
        let token = tokenizer.classify(0, &text).unwrap();
        prop_assert!(token.is_literal());
    }
}
