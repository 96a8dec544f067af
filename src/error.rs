//! Error types
//!
//!     `LexError` means the input could not be tokenized. `UnmatchedBlock` means block matching
//!     ran off the end of the stream, which is an engine fault for lexically valid input.
//!     `NonConvergence` means the fixer set kept rewriting past the pass bound. Callers can tell
//!     bad input from engine bugs from fixer conflicts by variant.

use crate::config::ConfigError;
use crate::tokenizer::lexing::LexError;
use crate::tokenizer::tokens::BlockType;
use thiserror::Error;

/// Failure raised from inside a fixer or transformer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixerError {
    #[error("unmatched {block} block opened at token {index}")]
    UnmatchedBlock { index: usize, block: BlockType },
    #[error("{0}")]
    Failed(String),
}

/// Session-level error returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("`{stage}`: unmatched {block} block opened at token {index}")]
    UnmatchedBlock {
        stage: String,
        index: usize,
        block: BlockType,
    },

    #[error("`{stage}` failed: {message}")]
    Failed { stage: String, message: String },

    #[error("no fixed point after {passes} passes; still changing: {}", fixers.join(", "))]
    NonConvergence { passes: usize, fixers: Vec<String> },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Attaches the name of the fixer or transformer that raised `err`.
    pub fn in_stage(stage: &str, err: FixerError) -> Self {
        match err {
            FixerError::UnmatchedBlock { index, block } => Error::UnmatchedBlock {
                stage: stage.to_string(),
                index,
                block,
            },
            FixerError::Failed(message) => Error::Failed {
                stage: stage.to_string(),
                message,
            },
        }
    }
}
