//! Demotes documentation comments that document nothing
//!
//!     A documentation comment is kept when it sits in front of a structural element, or when it
//!     types a variable that the following statement introduces: an assignment, a `foreach` or
//!     other control header, or a `list(...)` destructuring. Comments right after the open tag
//!     or a namespace declaration are file-level docs and are kept too. Everything else becomes
//!     a plain block comment.

use crate::docblock::to_plain_comment;
use crate::error::FixerError;
use crate::fixer::Fixer;
use crate::tokenizer::kind::{Kind, CONTROL_STRUCTURES, STRUCTURAL_ELEMENTS};
use crate::tokenizer::tokens::{BlockType, Tokens};
use tracing::trace;

pub struct PhpdocToCommentFixer;

impl Fixer for PhpdocToCommentFixer {
    fn name(&self) -> &str {
        "phpdoc_to_comment"
    }

    fn description(&self) -> &str {
        "Docblocks should only be used on structural elements."
    }

    // Runs before every fixer that works on documentation comments
    fn priority(&self) -> i32 {
        25
    }

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_kind_found(Kind::DocComment)
    }

    fn fix(&self, tokens: &mut Tokens) -> Result<(), FixerError> {
        for index in tokens.find_given_kind(Kind::DocComment) {
            if documents_something(tokens, index)? {
                continue;
            }
            trace!(index, "demoting documentation comment");
            let text = to_plain_comment(&tokens[index].text);
            tokens.override_at(index, Kind::Comment, text);
        }
        Ok(())
    }
}

fn documents_something(tokens: &Tokens, index: usize) -> Result<bool, FixerError> {
    let Some(next) = tokens.next_meaningful(index) else {
        return Ok(false);
    };
    let next_token = &tokens[next];
    if next_token.equals("}") {
        return Ok(false);
    }
    if next_token.is_any_kind(STRUCTURAL_ELEMENTS) {
        return Ok(true);
    }

    let doc = tokens[index].text.as_str();
    if next_token.is_any_kind(CONTROL_STRUCTURES) && types_control_variable(tokens, doc, next)? {
        return Ok(true);
    }
    if next_token.is_kind(Kind::Variable) && types_assignment(tokens, doc, next) {
        return Ok(true);
    }
    if next_token.is_kind(Kind::List) && types_list(tokens, doc, next)? {
        return Ok(true);
    }

    Ok(tokens
        .prev_meaningful(index)
        .is_some_and(|prev| follows_file_header(tokens, prev)))
}

/// A variable inside the header of the control structure at `control` is named in `doc`.
fn types_control_variable(tokens: &Tokens, doc: &str, control: usize) -> Result<bool, FixerError> {
    let Some(open) = tokens.next_meaningful(control) else {
        return Ok(false);
    };
    let Some(block) = BlockType::opened_by(&tokens[open].text) else {
        return Ok(false);
    };
    let close = tokens.find_block_end(block, open)?;
    Ok(names_a_variable(tokens, doc, open + 1, close))
}

/// `$var = ...` where `$var` is named in `doc`.
fn types_assignment(tokens: &Tokens, doc: &str, variable: usize) -> bool {
    tokens
        .next_meaningful(variable)
        .is_some_and(|i| tokens[i].equals("="))
        && doc.contains(tokens[variable].text.as_str())
}

/// `list(...)` destructuring a variable named in `doc`.
fn types_list(tokens: &Tokens, doc: &str, list: usize) -> Result<bool, FixerError> {
    let Some(open) = tokens.next_meaningful(list).filter(|&i| tokens[i].equals("(")) else {
        return Ok(false);
    };
    let close = tokens.find_block_end(BlockType::Parenthesis, open)?;
    Ok(names_a_variable(tokens, doc, open + 1, close))
}

fn names_a_variable(tokens: &Tokens, doc: &str, from: usize, to: usize) -> bool {
    (from..to).any(|i| tokens[i].is_kind(Kind::Variable) && doc.contains(tokens[i].text.as_str()))
}

/// `prev` is the open tag, or belongs to a `namespace Name` declaration.
fn follows_file_header(tokens: &Tokens, prev: usize) -> bool {
    let token = &tokens[prev];
    if token.is_any_kind(&[Kind::OpenTag, Kind::Namespace]) {
        return true;
    }
    if !token.equals(";") && !token.equals("{") {
        return false;
    }

    let mut cursor = prev;
    while let Some(i) = tokens.prev_non_whitespace(cursor) {
        let t = &tokens[i];
        if t.is_kind(Kind::Namespace) {
            return true;
        }
        if !t.is_any_kind(&[Kind::Identifier, Kind::NsSeparator]) {
            return false;
        }
        cursor = i;
    }
    false
}
