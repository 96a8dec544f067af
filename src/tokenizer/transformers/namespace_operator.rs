//! `namespace` as an operator
//!
//!     `namespace\foo()` resolves `foo` relative to the current namespace. The keyword there is
//!     not a declaration, so it is retagged `namespace_operator` before fixers look for
//!     namespace declarations.

use crate::error::FixerError;
use crate::tokenizer::kind::Kind;
use crate::tokenizer::tokens::Tokens;
use crate::tokenizer::transformer::{require_custom_kind, Transformer};
use crate::tokenizer::transformers::NAMESPACE_OPERATOR;

pub const NAMESPACE_INTEREST: &[Kind] = &[Kind::Namespace];

pub struct NamespaceOperatorTransformer {
    interest: &'static [Kind],
}

impl NamespaceOperatorTransformer {
    pub fn new() -> Self {
        Self {
            interest: NAMESPACE_INTEREST,
        }
    }
}

impl Default for NamespaceOperatorTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for NamespaceOperatorTransformer {
    fn name(&self) -> &str {
        "namespace_operator"
    }

    fn description(&self) -> &str {
        "Marks `namespace` used in relative names as an operator."
    }

    fn custom_kind_names(&self) -> &[&'static str] {
        &[NAMESPACE_OPERATOR]
    }

    fn interest(&self) -> &[Kind] {
        self.interest
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<(), FixerError> {
        let followed_by_separator = tokens
            .next_meaningful(index)
            .is_some_and(|next| tokens[next].is_kind(Kind::NsSeparator));
        if followed_by_separator {
            let kind = require_custom_kind(tokens, NAMESPACE_OPERATOR)?;
            let text = tokens[index].text.clone();
            tokens.override_at(index, kind, text);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::transformer::TransformerPipeline;

    #[test]
    fn test_relative_name() {
        let pipeline = TransformerPipeline::new(vec![Box::new(NamespaceOperatorTransformer::new())]);
        let mut tokens = Tokens::from_source("<?php namespace Foo; namespace\\bar();").unwrap();
        pipeline.run(&mut tokens).unwrap();

        let operator = tokens.custom_kind(NAMESPACE_OPERATOR).unwrap();
        assert_eq!(tokens.find_given_kind(Kind::Namespace).len(), 1);
        assert_eq!(tokens.find_given_kind(operator).len(), 1);
    }
}
