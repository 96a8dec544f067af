//! Tokenizer layer
//!
//!     This module owns everything between source text and the token stream fixers work on.
//!
//! Layers
//!
//!     Lexical adapter:
//!         Turns PHP source into a flat list of tokens with native kinds. See [lexing].
//!
//!     Token stream:
//!         The mutable, index-stable sequence every later stage operates on, with meaningful-token
//!         navigation, block matching and an exact kind-presence index. See [tokens].
//!
//!     Transformers:
//!         Single-pass disambiguators that retag ambiguous raw tokens with custom kinds. See
//!         [transformer] for the interface and pipeline, [transformers] for the shipped ones.

pub mod kind;
pub mod lexing;
pub mod token;
pub mod tokens;
pub mod transformer;
pub mod transformers;

pub use kind::{CustomKind, CustomKinds, Kind};
pub use lexing::{detokenize, tokenize, LexError};
pub use token::{Pattern, Token};
pub use tokens::{BlockType, Tokens};
pub use transformer::{Transformer, TransformerPipeline};
