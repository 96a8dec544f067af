//! `use` disambiguation
//!
//!     PHP spells three different things `use`: trait composition inside a class body, namespace
//!     imports, and the capture list of a closure. This transformer retags the first as
//!     `use_trait` and the last as `use_lambda`; imports keep the native kind.
//!
//!     For a class-like declaration the transformer jumps to the body's opening brace, finds its
//!     closer, and scans only that range. Nested brace blocks (method bodies, trait adaptation
//!     blocks) are skipped as a whole, so only keywords directly inside the class body become
//!     `use_trait`. Closures inside methods are handled when the scan reaches their own `use`.

use crate::error::FixerError;
use crate::tokenizer::kind::Kind;
use crate::tokenizer::token::Pattern;
use crate::tokenizer::tokens::{BlockType, Tokens};
use crate::tokenizer::transformer::{require_custom_kind, Transformer};
use crate::tokenizer::transformers::{USE_LAMBDA, USE_TRAIT};
use tracing::trace;

/// Tokens the transformer is invoked on.
pub const USE_INTEREST: &[Kind] = &[Kind::Class, Kind::Interface, Kind::Trait, Kind::Use];

pub struct UseTransformer {
    interest: &'static [Kind],
}

impl UseTransformer {
    pub fn new() -> Self {
        Self {
            interest: USE_INTEREST,
        }
    }

    fn process_class_body(&self, tokens: &mut Tokens, index: usize) -> Result<(), FixerError> {
        let Some(open) = tokens.next_token_of(index, &[Pattern::Text("{")]) else {
            return Ok(());
        };
        let close = tokens.find_block_end(BlockType::CurlyBrace, open)?;
        let use_trait = require_custom_kind(tokens, USE_TRAIT)?;

        let mut i = open + 1;
        while i < close {
            if tokens[i].equals("{") {
                i = tokens.find_block_end(BlockType::CurlyBrace, i)? + 1;
                continue;
            }
            if tokens[i].is_kind(Kind::Use) {
                let text = tokens[i].text.clone();
                trace!(index = i, "use retagged as trait import");
                tokens.override_at(i, use_trait, text);
            }
            i += 1;
        }
        Ok(())
    }
}

impl Default for UseTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for UseTransformer {
    fn name(&self) -> &str {
        "use_keyword"
    }

    fn description(&self) -> &str {
        "Splits `use` into trait imports, closure captures and namespace imports."
    }

    fn custom_kind_names(&self) -> &[&'static str] {
        &[USE_TRAIT, USE_LAMBDA]
    }

    fn interest(&self) -> &[Kind] {
        self.interest
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<(), FixerError> {
        if tokens[index].is_classy() {
            return self.process_class_body(tokens, index);
        }

        if tokens[index].is_kind(Kind::Use) && is_use_for_lambda(tokens, index) {
            let use_lambda = require_custom_kind(tokens, USE_LAMBDA)?;
            let text = tokens[index].text.clone();
            trace!(index, "use retagged as closure capture");
            tokens.override_at(index, use_lambda, text);
        }
        Ok(())
    }
}

/// `function () use ($foo) {}`: the capture list opens right after the keyword.
fn is_use_for_lambda(tokens: &Tokens, index: usize) -> bool {
    tokens
        .next_meaningful(index)
        .is_some_and(|next| tokens[next].equals("("))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::transformer::TransformerPipeline;

    fn transform(source: &str) -> Tokens {
        let pipeline = TransformerPipeline::new(vec![Box::new(UseTransformer::new())]);
        let mut tokens = Tokens::from_source(source).unwrap();
        pipeline.run(&mut tokens).unwrap();
        tokens
    }

    fn use_kinds(tokens: &Tokens) -> Vec<String> {
        let trait_kind = tokens.custom_kind(USE_TRAIT).unwrap();
        let lambda_kind = tokens.custom_kind(USE_LAMBDA).unwrap();
        tokens
            .iter()
            .filter_map(|t| {
                if t.kind == trait_kind {
                    Some("trait".to_string())
                } else if t.kind == lambda_kind {
                    Some("lambda".to_string())
                } else if t.kind == Kind::Use {
                    Some("import".to_string())
                } else {
                    None
                }
            })
            .collect()
    }

    #[test]
    fn test_namespace_import_untouched() {
        let tokens = transform("<?php use Foo\\Bar;");
        assert_eq!(use_kinds(&tokens), vec!["import"]);
    }

    #[test]
    fn test_closure_capture() {
        let tokens = transform("<?php $f = function () use ($a) {};");
        assert_eq!(use_kinds(&tokens), vec!["lambda"]);
    }

    #[test]
    fn test_trait_use_in_class_body() {
        let tokens = transform("<?php use Foo; class A { use Bar, Baz { Bar::x insteadof Baz; } use Qux; }");
        assert_eq!(use_kinds(&tokens), vec!["import", "trait", "trait"]);
    }

    #[test]
    fn test_closure_inside_method_is_not_a_trait() {
        let source = "<?php trait T { use U; function f() { return function () use ($x) {}; } }";
        let tokens = transform(source);
        assert_eq!(use_kinds(&tokens), vec!["trait", "lambda"]);
        assert_eq!(tokens.generate_code(), source);
    }

    #[test]
    fn test_class_constant_is_not_a_declaration() {
        let tokens = transform("<?php $n = Foo::class; $f = function () use ($a) {};");
        assert_eq!(use_kinds(&tokens), vec!["lambda"]);
    }

    #[test]
    fn test_unmatched_class_body_is_a_fault() {
        let pipeline = TransformerPipeline::new(vec![Box::new(UseTransformer::new())]);
        let mut tokens = Tokens::from_source("<?php class A { use B;").unwrap();
        assert!(matches!(
            pipeline.run(&mut tokens),
            Err(crate::error::Error::UnmatchedBlock { .. })
        ));
    }
}
