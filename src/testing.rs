//! Testing utilities for fixer fixtures
//!
//! # Fixture Rules
//!
//! Every fixture is a pair of an `expected` text and an optional `input` text. Use
//! [`do_test`] for both halves of the contract:
//!
//! 1. The engine turns `input` into exactly `expected`.
//! 2. The engine leaves `expected` untouched.
//!
//! The second check runs even when `input` is given, so every fixture doubles as an idempotence
//! test. A fixture without `input` only asserts that already-fixed code stays as it is.
//!
//! ```rust-example
//! use phpfix::fixer::ElseifFixer;
//! use phpfix::testing::{do_test, engine_with};
//!
//! let engine = engine_with(vec![Box::new(ElseifFixer)]);
//! do_test(
//!     &engine,
//!     "<?php if ($a) {} elseif ($b) {}",
//!     Some("<?php if ($a) {} else if ($b) {}"),
//! );
//! ```
//!
//! Engines built with [`engine_with`] run the shipped transformers, so fixers that rely on
//! custom kinds (closure `use`, for instance) see the same stream they see in production.

use crate::config::TransformerRegistry;
use crate::engine::Engine;
use crate::fixer::{Fixer, FixerSet};
use crate::tokenizer::transformer::TransformerPipeline;

/// Engine over `fixers` with every shipped transformer.
pub fn engine_with(fixers: Vec<Box<dyn Fixer>>) -> Engine {
    let registry = TransformerRegistry::with_defaults();
    let transformers = registry
        .names()
        .into_iter()
        .filter_map(|name| registry.create(name).ok())
        .collect();
    Engine::new(TransformerPipeline::new(transformers), FixerSet::new(fixers))
}

/// Asserts that `input` fixes to `expected` and that `expected` is a fixed point.
///
/// # Panics
///
/// On any mismatch, or when the engine fails on either text.
pub fn do_test(engine: &Engine, expected: &str, input: Option<&str>) {
    if let Some(input) = input {
        assert_ne!(
            expected, input,
            "input and expected must differ; pass None to check a fixed point"
        );
        let fixed = fix_or_panic(engine, input);
        assert_eq!(expected, fixed, "fixing the input gave unexpected code");
    }

    let fixed = fix_or_panic(engine, expected);
    assert_eq!(expected, fixed, "expected code is not a fixed point");
}

fn fix_or_panic(engine: &Engine, source: &str) -> String {
    match engine.fix(source) {
        Ok(report) => report.code,
        Err(err) => panic!("engine failed on {:?}: {}", source, err),
    }
}
