//! Spacing of function and closure declarations
//!
//!     function foo($a, $b) {}
//!     function ($a) use ($b) {}
//!
//!     One space after `function`, none between the name and the parameter list, none just
//!     inside single-line parameter and `use` lists, one space on each side of a closure `use`,
//!     and one space before a body brace that sits on the same line. Multi-line layouts are left
//!     as written.

use crate::error::FixerError;
use crate::fixer::Fixer;
use crate::tokenizer::kind::Kind;
use crate::tokenizer::token::Pattern;
use crate::tokenizer::tokens::{BlockType, Tokens};
use crate::tokenizer::transformers::USE_LAMBDA;

pub struct FunctionDeclarationFixer;

impl Fixer for FunctionDeclarationFixer {
    fn name(&self) -> &str {
        "function_declaration"
    }

    fn description(&self) -> &str {
        "Spaces should be properly placed in a function declaration."
    }

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_kind_found(Kind::Function)
    }

    fn fix(&self, tokens: &mut Tokens) -> Result<(), FixerError> {
        let use_lambda = tokens.custom_kind(USE_LAMBDA);

        // Backwards, so insertions never shift a declaration that is still to be visited
        for index in (0..tokens.len()).rev() {
            if !tokens[index].is_kind(Kind::Function) {
                continue;
            }

            // `use function Foo\bar;` imports a function, it does not declare one
            let Some(params_open) = tokens.next_token_of(
                index,
                &[
                    Pattern::Text("("),
                    Pattern::Text(";"),
                    Pattern::Kind(Kind::CloseTag),
                ],
            ) else {
                continue;
            };
            if !tokens[params_open].equals("(") {
                continue;
            }
            let params_close = tokens.find_block_end(BlockType::Parenthesis, params_open)?;

            let body = tokens
                .next_token_of(params_close, &[Pattern::Text(";"), Pattern::Text("{")])
                .filter(|&i| tokens[i].equals("{"));
            if let Some(brace) = body {
                let before = &tokens[brace - 1];
                if !before.is_whitespace() || before.is_single_line_whitespace() {
                    tokens.ensure_whitespace_at(brace - 1, 1, " ");
                }
            }

            if let Some(use_lambda) = use_lambda {
                let after_params = tokens.next_non_whitespace(params_close);
                if let Some(use_index) = after_params.filter(|&i| tokens[i].is_kind(use_lambda)) {
                    fix_closure_use(tokens, use_index)?;
                }
            }

            clear_inner_edges(tokens, params_open, params_close);

            if tokens[params_open - 1].is_whitespace() {
                tokens.clear(params_open - 1);
            }

            tokens.ensure_whitespace_at(index + 1, 0, " ");
        }
        Ok(())
    }
}

fn fix_closure_use(tokens: &mut Tokens, use_index: usize) -> Result<(), FixerError> {
    let open = tokens
        .next_token_of(use_index, &[Pattern::Text("(")])
        .ok_or(FixerError::UnmatchedBlock {
            index: use_index,
            block: BlockType::Parenthesis,
        })?;
    let close = tokens.find_block_end(BlockType::Parenthesis, open)?;
    clear_inner_edges(tokens, open, close);

    tokens.ensure_whitespace_at(use_index + 1, 0, " ");
    tokens.ensure_whitespace_at(use_index - 1, 1, " ");
    Ok(())
}

/// Clears single-line whitespace right inside the parentheses at `open` and `close`.
fn clear_inner_edges(tokens: &mut Tokens, open: usize, close: usize) {
    if close > open + 1 && tokens[close - 1].is_single_line_whitespace() {
        tokens.clear(close - 1);
    }
    if close > open + 1 && tokens[open + 1].is_single_line_whitespace() {
        tokens.clear(open + 1);
    }
}
