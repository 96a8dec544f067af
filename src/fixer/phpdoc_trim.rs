//! Trims blank lines at the top and bottom of documentation comments
//!
//!     Two passes over each comment. The first walks forward from the opening line and drops
//!     lines without useful content until it meets one that has some; the second does the same
//!     backwards from the closing line. A comment is never reduced below three lines, so a
//!     deliberately empty `/**\n *\n */` survives.

use crate::docblock::DocBlock;
use crate::error::FixerError;
use crate::fixer::Fixer;
use crate::tokenizer::kind::Kind;
use crate::tokenizer::tokens::Tokens;

const MIN_LINES: usize = 3;

pub struct PhpdocTrimFixer;

impl Fixer for PhpdocTrimFixer {
    fn name(&self) -> &str {
        "phpdoc_trim"
    }

    fn description(&self) -> &str {
        "Phpdocs should start and end with content, excluding the very first and last line of the docblocks."
    }

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_kind_found(Kind::DocComment)
    }

    fn fix(&self, tokens: &mut Tokens) -> Result<(), FixerError> {
        for index in tokens.find_given_kind(Kind::DocComment) {
            let trimmed = trim_end(&trim_start(&tokens[index].text));
            tokens.set_text(index, trimmed);
        }
        Ok(())
    }
}

fn trim_start(text: &str) -> String {
    let mut doc = DocBlock::new(text);
    let total = doc.lines().len();
    for index in 0..total {
        let line = &doc.lines()[index];
        if line.is_the_start() {
            continue;
        }
        if total - index < MIN_LINES || line.contains_useful_content() {
            break;
        }
        if let Some(line) = doc.line_mut(index) {
            line.remove();
        }
    }
    doc.content()
}

fn trim_end(text: &str) -> String {
    let mut doc = DocBlock::new(text);
    let total = doc.lines().len();
    for (from_end, index) in (0..total).rev().enumerate() {
        let line = &doc.lines()[index];
        if line.is_the_end() {
            continue;
        }
        if total - from_end < MIN_LINES || line.contains_useful_content() {
            break;
        }
        if let Some(line) = doc.line_mut(index) {
            line.remove();
        }
    }
    doc.content()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_start() {
        assert_eq!(
            trim_start("/**\n *\n *\n * Foo\n */"),
            "/**\n * Foo\n */"
        );
    }

    #[test]
    fn test_trim_end() {
        assert_eq!(trim_end("/**\n * Foo\n *\n *\n */"), "/**\n * Foo\n */");
    }

    #[test]
    fn test_minimal_block_survives() {
        assert_eq!(trim_start("/**\n *\n */"), "/**\n *\n */");
        assert_eq!(trim_end("/**\n *\n */"), "/**\n *\n */");
    }

    #[test]
    fn test_single_line_untouched() {
        assert_eq!(trim_end(&trim_start("/** Foo */")), "/** Foo */");
    }
}
