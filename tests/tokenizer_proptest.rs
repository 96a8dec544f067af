//! Property-based tests for the PHP lexical adapter
//!
//! Tokenizing either fails cleanly or gives back tokens that concatenate to the input, with
//! offsets that follow one another.

use phpfix::tokenizer::lexing::{detokenize, tokenize};
use phpfix::tokenizer::tokens::Tokens;
use proptest::prelude::*;

/// Code-like text: identifiers, variables, brackets, operators, strings and comments.
fn php_fragment() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("function".to_string()),
            Just("if".to_string()),
            Just("else".to_string()),
            Just("use".to_string()),
            Just("namespace".to_string()),
            Just("class".to_string()),
            "[a-z_]{1,6}",
            "\\$[a-z]{1,4}",
            "[0-9]{1,3}",
            "[ \t\n]{1,3}",
            "[(){}\\[\\];,=.+<>!?:&|-]",
            "'[a-z \"]{0,5}'",
            "/\\*\\*? [a-z@ ]{0,8}\\*/",
            "// [a-z ]{0,6}\n",
            Just("?>".to_string()),
            Just("\\".to_string()),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_arbitrary_text_round_trips_or_errors(source in "\\PC{0,80}") {
        if let Ok(tokens) = tokenize(&source) {
            prop_assert_eq!(detokenize(&tokens), source);
        }
    }

    #[test]
    fn prop_code_round_trips(body in php_fragment()) {
        let source = format!("<?php {}", body);
        if let Ok(tokens) = tokenize(&source) {
            let mut expected_offset = 0;
            for token in &tokens {
                prop_assert_eq!(token.offset, expected_offset);
                prop_assert!(!token.text.is_empty());
                expected_offset += token.text.len();
            }
            prop_assert_eq!(detokenize(&tokens), source);
        }
    }

    #[test]
    fn prop_default_engine_is_idempotent(body in php_fragment()) {
        let source = format!("<?php {}", body);
        let engine = phpfix::EngineConfig::default().build().unwrap();
        if let Ok(first) = engine.fix(&source) {
            let second = engine.fix(&first.code);
            prop_assert!(second.is_ok());
            prop_assert_eq!(second.unwrap().code, first.code);
        }
    }

    #[test]
    fn prop_stream_matches_tokens(body in php_fragment()) {
        let source = format!("<?php {}", body);
        if let Ok(stream) = Tokens::from_source(&source) {
            prop_assert_eq!(stream.generate_code(), source);
        }
    }
}
