//! `else if` to `elseif`

use crate::error::FixerError;
use crate::fixer::Fixer;
use crate::tokenizer::kind::Kind;
use crate::tokenizer::tokens::Tokens;

pub struct ElseifFixer;

impl Fixer for ElseifFixer {
    fn name(&self) -> &str {
        "elseif"
    }

    fn description(&self) -> &str {
        "The keyword elseif should be used instead of else if so that all control keywords look like single words."
    }

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_all_kinds_found(&[Kind::If, Kind::Else])
    }

    fn fix(&self, tokens: &mut Tokens) -> Result<(), FixerError> {
        for index in tokens.find_given_kind(Kind::Else) {
            let Some(next) = tokens.next_non_whitespace(index) else {
                continue;
            };
            if !tokens[next].is_kind(Kind::If) {
                continue;
            }

            if index + 1 < next && tokens[index + 1].is_whitespace() {
                tokens.clear(index + 1);
            }
            tokens.override_at(index, Kind::ElseIf, "elseif");
            tokens.clear(next);
        }
        Ok(())
    }
}
