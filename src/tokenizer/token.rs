//! A single lexical unit
//!
//!     A token is a kind tag, its exact source text, and the byte offset it was read from.
//!     Tokens created by fixers carry the offset of the slot they were placed at; offsets are
//!     informational and never used to rebuild text.

use crate::tokenizer::kind::{Kind, CLASSY};

/// Whitespace characters as PHP's `trim` sees them.
const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: Kind,
    pub text: String,
    pub offset: usize,
}

/// What a token is compared against.
///
/// Bracket matching and many fixers only care about the text of punctuation, while keyword
/// checks only care about the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern<'a> {
    Text(&'a str),
    Kind(Kind),
    Exact(Kind, &'a str),
}

impl Token {
    pub fn new(kind: Kind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    pub fn is_kind(&self, kind: Kind) -> bool {
        self.kind == kind
    }

    pub fn is_any_kind(&self, kinds: &[Kind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Text-only comparison.
    pub fn equals(&self, text: &str) -> bool {
        self.text == text
    }

    pub fn matches(&self, pattern: &Pattern<'_>) -> bool {
        match *pattern {
            Pattern::Text(text) => self.text == text,
            Pattern::Kind(kind) => self.kind == kind,
            Pattern::Exact(kind, text) => self.kind == kind && self.text == text,
        }
    }

    pub fn matches_any(&self, patterns: &[Pattern<'_>]) -> bool {
        patterns.iter().any(|p| self.matches(p))
    }

    /// True when the text is empty or consists only of whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(|c| WHITESPACE.contains(&c))
    }

    /// Whitespace that stays on one line: spaces and tabs only.
    pub fn is_single_line_whitespace(&self) -> bool {
        self.text.chars().all(|c| c == ' ' || c == '\t')
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, Kind::Comment | Kind::DocComment)
    }

    pub fn is_classy(&self) -> bool {
        self.is_any_kind(CLASSY)
    }

    pub fn is_cleared(&self) -> bool {
        self.text.is_empty()
    }
}
