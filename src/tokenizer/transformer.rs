//! Transformer interface and pipeline
//!
//!     A transformer disambiguates raw tokens whose kind depends on context, retagging them with
//!     one of the custom kinds it declares. The pipeline runs once per session, after the stream
//!     is built and before any fixer pass.
//!
//! Design principles:
//! - Transformers only look at a bounded neighborhood of the token they are given.
//! - Transformers touch nothing outside the stream.
//! - Pipeline order is fixed by configuration. A transformer may only rely on kinds an earlier
//!   transformer reserved, never on inferred ordering.

use crate::error::{Error, FixerError};
use crate::tokenizer::kind::{CustomKinds, Kind};
use crate::tokenizer::tokens::Tokens;
use tracing::debug;

/// A single-pass disambiguator over a token stream.
///
/// # Examples
///
/// ```ignore
/// struct MyTransformer;
///
/// impl Transformer for MyTransformer {
///     fn name(&self) -> &str {
///         "my_transformer"
///     }
///
///     fn custom_kind_names(&self) -> &[&'static str] {
///         &["my_kind"]
///     }
///
///     fn interest(&self) -> &[Kind] {
///         &[Kind::Use]
///     }
///
///     fn process(&self, tokens: &mut Tokens, index: usize) -> Result<(), FixerError> {
///         let kind = require_custom_kind(tokens, "my_kind")?;
///         let text = tokens[index].text.clone();
///         tokens.override_at(index, kind, text);
///         Ok(())
///     }
/// }
/// ```
pub trait Transformer {
    /// Names should be lowercase with underscores (e.g., "use_keyword")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Custom kinds this transformer may assign.
    fn custom_kind_names(&self) -> &[&'static str];

    /// Kinds of the raw tokens this transformer wants to see.
    fn interest(&self) -> &[Kind];

    /// Inspect the token at `index` and retag it (or tokens it owns) if needed.
    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<(), FixerError>;
}

/// Looks up a custom kind the pipeline reserved for this stream.
pub fn require_custom_kind(tokens: &Tokens, name: &str) -> Result<Kind, FixerError> {
    tokens
        .custom_kind(name)
        .ok_or_else(|| FixerError::Failed(format!("custom kind `{}` is not reserved", name)))
}

/// Ordered list of transformers plus the custom kinds they reserved.
#[derive(Default)]
pub struct TransformerPipeline {
    transformers: Vec<Box<dyn Transformer>>,
    custom_kinds: CustomKinds,
}

impl TransformerPipeline {
    /// Builds the pipeline and reserves every declared custom kind, in pipeline order.
    pub fn new(transformers: Vec<Box<dyn Transformer>>) -> Self {
        let mut custom_kinds = CustomKinds::new();
        for transformer in &transformers {
            for name in transformer.custom_kind_names() {
                custom_kinds.reserve(name);
            }
        }
        Self {
            transformers,
            custom_kinds,
        }
    }

    pub fn custom_kinds(&self) -> &CustomKinds {
        &self.custom_kinds
    }

    pub fn names(&self) -> Vec<&str> {
        self.transformers.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Installs the registry into `tokens` and runs every transformer over it once.
    pub fn run(&self, tokens: &mut Tokens) -> Result<(), Error> {
        tokens.set_custom_kinds(self.custom_kinds.clone());

        for transformer in &self.transformers {
            let interest = transformer.interest();
            if !tokens.is_any_kind_found(interest) {
                continue;
            }

            let before = tokens.change_count();
            let mut index = 0;
            while index < tokens.len() {
                // Earlier calls may have retagged this token already
                if tokens[index].is_any_kind(interest) {
                    transformer
                        .process(tokens, index)
                        .map_err(|e| Error::in_stage(transformer.name(), e))?;
                }
                index += 1;
            }
            debug!(
                transformer = transformer.name(),
                retagged = tokens.change_count() - before,
                "transformer finished"
            );
        }
        Ok(())
    }
}
