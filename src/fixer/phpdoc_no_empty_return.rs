//! Drops `@return void` and `@return null` annotations

use crate::docblock::DocBlock;
use crate::error::FixerError;
use crate::fixer::Fixer;
use crate::tokenizer::kind::Kind;
use crate::tokenizer::tokens::Tokens;
use once_cell::sync::Lazy;
use regex::Regex;

static EMPTY_RETURN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@return\s+(?:void|null)").expect("empty return pattern is valid")
});

pub struct PhpdocNoEmptyReturnFixer;

impl Fixer for PhpdocNoEmptyReturnFixer {
    fn name(&self) -> &str {
        "phpdoc_no_empty_return"
    }

    fn description(&self) -> &str {
        "@return void and @return null annotations should be omitted from phpdocs."
    }

    // Before phpdoc_trim, which cleans up the blank lines a removal leaves behind
    fn priority(&self) -> i32 {
        10
    }

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_kind_found(Kind::DocComment)
    }

    fn fix(&self, tokens: &mut Tokens) -> Result<(), FixerError> {
        for index in tokens.find_given_kind(Kind::DocComment) {
            let mut doc = DocBlock::new(&tokens[index].text);
            let mut changed = false;
            for annotation in doc.annotations_of_type("return") {
                let empty = doc
                    .line(annotation.start)
                    .is_some_and(|line| is_empty_return(&line.text()));
                if empty && doc.remove_annotation(&annotation) {
                    changed = true;
                }
            }
            if changed {
                tokens.set_text(index, doc.content());
            }
        }
        Ok(())
    }
}

/// `void` or `null` that is not the first member of a union type.
fn is_empty_return(line: &str) -> bool {
    EMPTY_RETURN
        .find(line)
        .is_some_and(|m| !line[m.end()..].starts_with('|'))
}
