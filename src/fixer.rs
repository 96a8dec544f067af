//! Fixer contract and fixer sets
//!
//!     A fixer is one independent rewrite rule. It exposes a cheap candidacy test, the rewrite
//!     itself, a priority, and a description. Fixers hold no state between calls; everything
//!     they know about a file comes from the token stream they are handed.
//!
//! Priority
//!
//!     Higher priorities run earlier within a pass. Fixers that change token kinds or coarse
//!     shape (demoting doc comments, for instance) run before fixers that depend on that shape.
//!     Ties keep registration order.

pub mod elseif;
pub mod function_declaration;
pub mod phpdoc_no_empty_return;
pub mod phpdoc_to_comment;
pub mod phpdoc_trim;

pub use elseif::ElseifFixer;
pub use function_declaration::FunctionDeclarationFixer;
pub use phpdoc_no_empty_return::PhpdocNoEmptyReturnFixer;
pub use phpdoc_to_comment::PhpdocToCommentFixer;
pub use phpdoc_trim::PhpdocTrimFixer;

use crate::error::FixerError;
use crate::tokenizer::tokens::Tokens;

/// A single rewrite rule over a token stream.
///
/// # Examples
///
/// ```ignore
/// struct LowercaseTrue;
///
/// impl Fixer for LowercaseTrue {
///     fn name(&self) -> &str {
///         "lowercase_true"
///     }
///
///     fn description(&self) -> &str {
///         "The true constant should be lowercase."
///     }
///
///     fn is_candidate(&self, tokens: &Tokens) -> bool {
///         tokens.is_kind_found(Kind::Identifier)
///     }
///
///     fn fix(&self, tokens: &mut Tokens) -> Result<(), FixerError> {
///         for index in tokens.find_given_kind(Kind::Identifier) {
///             if tokens[index].text.eq_ignore_ascii_case("true") {
///                 tokens.set_text(index, "true");
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Fixer {
    /// Names should be lowercase with underscores (e.g., "phpdoc_trim")
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn priority(&self) -> i32 {
        0
    }

    /// Fast check that rules out streams the fixer cannot change.
    fn is_candidate(&self, tokens: &Tokens) -> bool;

    /// Applies the rule. Must leave every index it did not insert at valid for the next fixer.
    fn fix(&self, tokens: &mut Tokens) -> Result<(), FixerError>;
}

/// Fixers in execution order.
#[derive(Default)]
pub struct FixerSet {
    fixers: Vec<Box<dyn Fixer>>,
}

impl FixerSet {
    /// Orders `fixers` by descending priority, keeping registration order among equals.
    pub fn new(mut fixers: Vec<Box<dyn Fixer>>) -> Self {
        fixers.sort_by_key(|f| std::cmp::Reverse(f.priority()));
        Self { fixers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Fixer> {
        self.fixers.iter().map(|f| f.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.fixers.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.fixers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixers.is_empty()
    }
}
