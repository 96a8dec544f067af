//! Mutable, index-addressed token stream
//!
//!     `Tokens` owns the token sequence of one file-fixing session. Every transformer and fixer
//!     operates on it through exclusive `&mut` calls, and the session serializes it back to text
//!     with [`Tokens::generate_code`].
//!
//! Index Stability
//!
//!     Slots are never removed while a fixer runs. Clearing a token empties its text and turns
//!     it into whitespace, so every index a fixer cached stays valid. Insertion shifts later
//!     indices; fixers that insert walk the stream backwards or insert last. Cleared slots are
//!     compacted by [`Tokens::clear_empty_tokens`], which the engine only calls between fixers.
//!
//! Kind Presence
//!
//!     A per-kind occurrence count is kept exact on every mutation, so candidacy checks such as
//!     [`Tokens::is_any_kind_found`] are O(1) and never see stale data.
//!
//! Change Tracking
//!
//!     Each effective mutation bumps a counter. Writing the same `(kind, text)` a slot already
//!     holds is not a change. The engine compares the counter around every fixer call, and
//!     falls back to [`Tokens::fingerprint`] when the counter moved, so a fixer that clears a
//!     slot and then writes the same text back is not reported as having changed anything.

use crate::error::FixerError;
use crate::tokenizer::kind::{CustomKinds, Kind};
use crate::tokenizer::lexing::{self, LexError};
use crate::tokenizer::token::{Pattern, Token};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

/// Bracket families understood by block matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Parenthesis,
    CurlyBrace,
    SquareBrace,
}

impl BlockType {
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            BlockType::Parenthesis => ("(", ")"),
            BlockType::CurlyBrace => ("{", "}"),
            BlockType::SquareBrace => ("[", "]"),
        }
    }

    /// Family whose opening delimiter is `text`.
    pub fn opened_by(text: &str) -> Option<BlockType> {
        match text {
            "(" => Some(BlockType::Parenthesis),
            "{" => Some(BlockType::CurlyBrace),
            "[" => Some(BlockType::SquareBrace),
            _ => None,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = self.delimiters();
        write!(f, "{}{}", open, close)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tokens {
    tokens: Vec<Token>,
    kind_counts: HashMap<Kind, usize>,
    custom_kinds: CustomKinds,
    changes: u64,
}

impl Tokens {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut kind_counts = HashMap::new();
        for token in &tokens {
            *kind_counts.entry(token.kind).or_insert(0) += 1;
        }
        Self {
            tokens,
            kind_counts,
            custom_kinds: CustomKinds::new(),
            changes: 0,
        }
    }

    /// Tokenizes `source` with the PHP lexical adapter.
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        Ok(Self::from_tokens(lexing::tokenize(source)?))
    }

    pub fn generate_code(&self) -> String {
        lexing::detokenize(&self.tokens)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of effective mutations applied so far.
    pub fn change_count(&self) -> u64 {
        self.changes
    }

    /// Hash of the kinds and texts of all non-empty tokens.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for token in self.tokens.iter().filter(|t| !t.is_cleared()) {
            token.kind.hash(&mut hasher);
            token.text.hash(&mut hasher);
        }
        hasher.finish()
    }

    // Navigation

    /// Nearest index after `index` whose token is not whitespace. Comments count as meaningful.
    pub fn next_meaningful(&self, index: usize) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| !self.tokens[i].is_whitespace())
    }

    /// Nearest index before `index` whose token is not whitespace. Comments count as meaningful.
    pub fn prev_meaningful(&self, index: usize) -> Option<usize> {
        (0..index.min(self.tokens.len()))
            .rev()
            .find(|&i| !self.tokens[i].is_whitespace())
    }

    /// Nearest index after `index` that is neither whitespace nor a comment.
    pub fn next_non_whitespace(&self, index: usize) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| self.is_significant(i))
    }

    /// Nearest index before `index` that is neither whitespace nor a comment.
    pub fn prev_non_whitespace(&self, index: usize) -> Option<usize> {
        (0..index.min(self.tokens.len()))
            .rev()
            .find(|&i| self.is_significant(i))
    }

    fn is_significant(&self, index: usize) -> bool {
        let token = &self.tokens[index];
        !token.is_whitespace() && !token.is_comment()
    }

    /// Nearest index after `index` whose token matches any of `patterns`.
    pub fn next_token_of(&self, index: usize, patterns: &[Pattern<'_>]) -> Option<usize> {
        (index + 1..self.tokens.len()).find(|&i| self.tokens[i].matches_any(patterns))
    }

    /// Indices of every token of `kind`, in order.
    pub fn find_given_kind(&self, kind: Kind) -> Vec<usize> {
        if !self.is_kind_found(kind) {
            return Vec::new();
        }
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == kind)
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of the closer matching the opener at `open`.
    ///
    /// Depth counting only looks at the delimiters of `block`; strings and comments are single
    /// tokens, so delimiters inside them are invisible here.
    pub fn find_block_end(&self, block: BlockType, open: usize) -> Result<usize, FixerError> {
        let (opener, closer) = block.delimiters();
        let unmatched = FixerError::UnmatchedBlock { index: open, block };

        match self.tokens.get(open) {
            Some(token) if token.equals(opener) => {}
            _ => return Err(unmatched),
        }

        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            if token.equals(opener) {
                depth += 1;
            } else if token.equals(closer) {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
        }
        Err(unmatched)
    }

    // Kind presence

    pub fn is_kind_found(&self, kind: Kind) -> bool {
        self.kind_counts.get(&kind).is_some_and(|&n| n > 0)
    }

    pub fn is_any_kind_found(&self, kinds: &[Kind]) -> bool {
        kinds.iter().any(|&k| self.is_kind_found(k))
    }

    pub fn is_all_kinds_found(&self, kinds: &[Kind]) -> bool {
        kinds.iter().all(|&k| self.is_kind_found(k))
    }

    // Custom kinds

    /// Reserves `name` in this stream's registry. Idempotent per name.
    pub fn reserve_custom_kind(&mut self, name: &str) -> Kind {
        self.custom_kinds.reserve(name)
    }

    pub fn custom_kind(&self, name: &str) -> Option<Kind> {
        self.custom_kinds.get(name)
    }

    pub fn custom_kinds(&self) -> &CustomKinds {
        &self.custom_kinds
    }

    pub(crate) fn set_custom_kinds(&mut self, custom_kinds: CustomKinds) {
        self.custom_kinds = custom_kinds;
    }

    // Mutation

    /// Replaces the kind and text of the token at `index`, keeping its offset.
    pub fn override_at(&mut self, index: usize, kind: Kind, text: impl Into<String>) {
        let text = text.into();
        let Some(token) = self.tokens.get_mut(index) else {
            return;
        };
        if token.kind == kind && token.text == text {
            return;
        }

        let old_kind = token.kind;
        token.kind = kind;
        token.text = text;

        if old_kind != kind {
            self.uncount(old_kind);
            *self.kind_counts.entry(kind).or_insert(0) += 1;
        }
        self.changes += 1;
    }

    /// Empties the slot at `index` without removing it.
    pub fn clear(&mut self, index: usize) {
        self.override_at(index, Kind::Whitespace, "");
    }

    /// Replaces the text of the token at `index`, keeping its kind.
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(kind) = self.tokens.get(index).map(|t| t.kind) {
            self.override_at(index, kind, text);
        }
    }

    /// Inserts `token` at `index`, shifting every later token by one.
    pub fn insert_at(&mut self, index: usize, token: Token) {
        let index = index.min(self.tokens.len());
        *self.kind_counts.entry(token.kind).or_insert(0) += 1;
        self.tokens.insert(index, token);
        self.changes += 1;
    }

    /// Makes sure whitespace `ws` sits at `index`.
    ///
    /// If the token at `index` is whitespace its text becomes `ws`; otherwise a new whitespace
    /// token is inserted at `index + offset`.
    pub fn ensure_whitespace_at(&mut self, index: usize, offset: usize, ws: &str) {
        if self.tokens.get(index).is_some_and(|t| t.is_whitespace()) {
            self.override_at(index, Kind::Whitespace, ws);
            return;
        }
        let at = index + offset;
        let source_offset = self
            .tokens
            .get(at)
            .map(|t| t.offset)
            .or_else(|| self.tokens.last().map(|t| t.offset + t.text.len()))
            .unwrap_or(0);
        self.insert_at(at, Token::new(Kind::Whitespace, ws, source_offset));
    }

    /// Drops cleared slots. Shifts indices; never call while a fixer holds indices.
    pub fn clear_empty_tokens(&mut self) {
        let before = self.tokens.len();
        self.tokens.retain(|t| !t.is_cleared());
        // Empty tokens render to nothing, so compaction is not a change.
        if self.tokens.len() != before {
            self.recount();
        }
    }

    fn uncount(&mut self, kind: Kind) {
        if let Some(n) = self.kind_counts.get_mut(&kind) {
            *n = n.saturating_sub(1);
            if *n == 0 {
                self.kind_counts.remove(&kind);
            }
        }
    }

    fn recount(&mut self) {
        self.kind_counts.clear();
        for token in &self.tokens {
            *self.kind_counts.entry(token.kind).or_insert(0) += 1;
        }
    }
}

impl Index<usize> for Tokens {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
