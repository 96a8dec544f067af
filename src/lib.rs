//! # phpfix
//!
//! A token-level rewriting engine for PHP source code.
//!
//! Source text is tokenized into a [`Tokens`](tokenizer::tokens::Tokens) stream, a pipeline of
//! transformers retags context-dependent tokens, and a prioritized set of fixers rewrites the
//! stream until a full pass changes nothing. Documentation comments get a structured
//! line and annotation view in [`docblock`].
//!
//! ```rust-example
//! use phpfix::config::EngineConfig;
//!
//! let engine = EngineConfig::default().build()?;
//! let report = engine.fix("<?php if ($a) {} else if ($b) {}")?;
//! assert_eq!(report.code, "<?php if ($a) {} elseif ($b) {}");
//! ```
//!
//! ## Testing
//!
//! Fixer fixtures go through [`testing::do_test`], which also checks that the expected code is
//! a fixed point.

pub mod config;
pub mod docblock;
pub mod engine;
pub mod error;
pub mod fixer;
pub mod testing;
pub mod tokenizer;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, FixReport};
pub use error::{Error, FixerError};
pub use fixer::Fixer;
