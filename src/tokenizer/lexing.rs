//! Lexical adapter for PHP source
//!
//!     This module turns file text into the flat token list the token stream is built from.
//!     Code regions are scanned with a logos lexer; everything outside `<?php` / `<?=` and `?>`
//!     is kept as inline HTML. This is the only place source text becomes tokens: transformers
//!     and fixers operate on the stream, never on the text.
//!
//! Fidelity
//!
//!     Concatenating the text of every produced token gives back the input exactly. Strings and
//!     comments are single opaque tokens, so bracket characters inside them never take part in
//!     block matching.
//!
//! Open Tags
//!
//!     Like PHP's own tokenizer, the open tag token swallows one whitespace character after
//!     `<?php` and the close tag swallows one newline after `?>`.
//!
//! Strings
//!
//!     Quoted, backtick, heredoc and nowdoc strings are each one token. A heredoc ends at the
//!     first line whose leading whitespace is followed by the label and a non-label character,
//!     so indented closing labels are accepted.

use crate::tokenizer::kind::Kind;
use crate::tokenizer::token::Token;
use logos::{Lexer, Logos};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Matches an open tag including the whitespace character PHP folds into it.
static OPEN_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\?php(?:\r\n|[ \t\n\r]|$)|<\?=").expect("open tag pattern is valid")
});

/// Errors raised while tokenizing source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated {what} starting at byte {offset}")]
    Unterminated { what: &'static str, offset: usize },
    #[error("unexpected character {ch:?} at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
}

/// Raw tokens of a PHP code region.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Raw {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("//", line_comment)]
    #[token("#", line_comment)]
    LineComment,

    #[token("#[")]
    AttributeStart,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("'", |lex| quoted(lex, b'\''))]
    #[token("\"", |lex| quoted(lex, b'"'))]
    #[token("`", |lex| quoted(lex, b'`'))]
    #[token("<<<", heredoc)]
    String,

    #[regex(r"\$[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Variable,

    #[regex(r"[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Identifier,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    Number,

    #[token("?>")]
    CloseTag,

    #[token("::")]
    DoubleColon,

    #[token("->")]
    #[token("?->")]
    ObjectOperator,

    #[token("=>")]
    DoubleArrow,

    #[token("\\")]
    NsSeparator,

    #[token("...")]
    Ellipsis,

    #[token("===")]
    #[token("!==")]
    #[token("==")]
    #[token("!=")]
    #[token("<>")]
    #[token("<=>")]
    #[token("<=")]
    #[token(">=")]
    #[token("&&")]
    #[token("||")]
    #[token("++")]
    #[token("--")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token(".=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<")]
    #[token(">>")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("**")]
    #[token("**=")]
    #[token("??")]
    #[token("??=")]
    Operator,

    #[regex(r"[(){}\[\];,.=+\-*/%<>!?:&|^~@$]")]
    Char,
}

/// Line comments end at the line break or right before a close tag.
fn line_comment(lex: &mut Lexer<Raw>) {
    let rest = lex.remainder();
    let mut end = rest.find(['\n', '\r']).unwrap_or(rest.len());
    if let Some(close) = rest[..end].find("?>") {
        end = close;
    }
    lex.bump(end);
}

fn block_comment(lex: &mut Lexer<Raw>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

/// `<<<LABEL`, `<<<"LABEL"` or `<<<'LABEL'`, through the closing label.
fn heredoc(lex: &mut Lexer<Raw>) -> bool {
    match heredoc_len(lex.remainder()) {
        Some(len) => {
            lex.bump(len);
            true
        }
        None => false,
    }
}

/// Length of a heredoc after its `<<<`, or `None` for a bad header or a missing closing label.
fn heredoc_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while matches!(bytes.get(i), Some(b' ' | b'\t')) {
        i += 1;
    }

    let quote = match bytes.get(i) {
        Some(&q @ (b'\'' | b'"')) => {
            i += 1;
            Some(q)
        }
        _ => None,
    };
    let label_start = i;
    while bytes.get(i).is_some_and(|&b| is_label_byte(b)) {
        i += 1;
    }
    if i == label_start || bytes[label_start].is_ascii_digit() {
        return None;
    }
    let label = &rest[label_start..i];
    if let Some(q) = quote {
        if bytes.get(i) != Some(&q) {
            return None;
        }
        i += 1;
    }

    if rest[i..].starts_with("\r\n") {
        i += 2;
    } else if bytes.get(i) == Some(&b'\n') {
        i += 1;
    } else {
        return None;
    }

    let mut line_start = i;
    loop {
        let mut j = line_start;
        while matches!(bytes.get(j), Some(b' ' | b'\t')) {
            j += 1;
        }
        let end = j + label.len();
        if rest[j..].starts_with(label) && !bytes.get(end).is_some_and(|&b| is_label_byte(b)) {
            return Some(end);
        }
        line_start += rest[line_start..].find('\n')? + 1;
    }
}

fn is_label_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

fn quoted(lex: &mut Lexer<Raw>, quote: u8) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                lex.bump(i + 1);
                return true;
            }
            _ => i += 1,
        }
    }
    false
}

/// Tokenize PHP source text.
///
/// Returns every token with its kind, exact text and byte offset, in source order.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];
        let Some(open) = OPEN_TAG.find(rest) else {
            tokens.push(Token::new(Kind::InlineHtml, rest, pos));
            break;
        };

        if open.start() > 0 {
            tokens.push(Token::new(Kind::InlineHtml, &rest[..open.start()], pos));
        }
        let kind = if open.as_str() == "<?=" {
            Kind::OpenTagWithEcho
        } else {
            Kind::OpenTag
        };
        tokens.push(Token::new(kind, open.as_str(), pos + open.start()));

        pos = tokenize_code(source, pos + open.end(), &mut tokens)?;
    }

    Ok(tokens)
}

/// Scans a code region starting at `start` and returns the position right after it.
fn tokenize_code(source: &str, start: usize, tokens: &mut Vec<Token>) -> Result<usize, LexError> {
    let mut lexer = Raw::lexer(&source[start..]);
    let mut after_member_access = false;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let offset = start + span.start;
        let raw = result.map_err(|_| classify_error(text, offset))?;

        let kind = match raw {
            Raw::CloseTag => {
                let rem = lexer.remainder();
                let mut end = span.end;
                if rem.starts_with("\r\n") {
                    end += 2;
                } else if rem.starts_with('\n') {
                    end += 1;
                }
                tokens.push(Token::new(
                    Kind::CloseTag,
                    &source[offset..start + end],
                    offset,
                ));
                return Ok(start + end);
            }
            Raw::Whitespace => Kind::Whitespace,
            Raw::LineComment => Kind::Comment,
            Raw::AttributeStart => Kind::AttributeStart,
            Raw::BlockComment => {
                if is_doc_comment(text) {
                    Kind::DocComment
                } else {
                    Kind::Comment
                }
            }
            Raw::String => Kind::String,
            Raw::Variable => Kind::Variable,
            // Member names after `->` and `::` are never keywords
            Raw::Identifier if after_member_access => Kind::Identifier,
            Raw::Identifier => Kind::keyword(text).unwrap_or(Kind::Identifier),
            Raw::Number => Kind::Number,
            Raw::DoubleColon => Kind::DoubleColon,
            Raw::ObjectOperator => Kind::ObjectOperator,
            Raw::DoubleArrow => Kind::DoubleArrow,
            Raw::NsSeparator => Kind::NsSeparator,
            Raw::Ellipsis => Kind::Ellipsis,
            Raw::Operator => Kind::Operator,
            Raw::Char => Kind::Char,
        };

        if !matches!(kind, Kind::Whitespace | Kind::Comment | Kind::DocComment) {
            after_member_access = matches!(kind, Kind::ObjectOperator | Kind::DoubleColon);
        }
        tokens.push(Token::new(kind, text, offset));
    }

    Ok(source.len())
}

/// `/**` followed by whitespace opens a documentation comment; `/**/` does not.
fn is_doc_comment(text: &str) -> bool {
    text.strip_prefix("/**")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

fn classify_error(text: &str, offset: usize) -> LexError {
    if text.starts_with("/*") {
        LexError::Unterminated {
            what: "comment",
            offset,
        }
    } else if text.starts_with("<<<") {
        LexError::Unterminated {
            what: "heredoc",
            offset,
        }
    } else if text.starts_with(['\'', '"', '`']) {
        LexError::Unterminated {
            what: "string",
            offset,
        }
    } else {
        LexError::UnexpectedChar {
            ch: text.chars().next().unwrap_or('\0'),
            offset,
        }
    }
}

/// Concatenates token texts back into source.
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(Kind, String)> {
        tokenize(source)
            .expect("source tokenizes")
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_inline_html_only() {
        assert_eq!(
            kinds("function foo () {}"),
            vec![(Kind::InlineHtml, "function foo () {}".to_string())]
        );
    }

    #[test]
    fn test_open_tag_swallows_one_whitespace() {
        let tokens = kinds("<?php\n\n$a;");
        assert_eq!(tokens[0], (Kind::OpenTag, "<?php\n".to_string()));
        assert_eq!(tokens[1], (Kind::Whitespace, "\n".to_string()));
        assert_eq!(tokens[2], (Kind::Variable, "$a".to_string()));
        assert_eq!(tokens[3], (Kind::Char, ";".to_string()));
    }

    #[test]
    fn test_else_if_keywords() {
        let tokens = kinds("<?php if ($a) {} else if ($b) {}");
        let keywords: Vec<Kind> = tokens
            .iter()
            .map(|(k, _)| *k)
            .filter(|k| matches!(k, Kind::If | Kind::Else))
            .collect();
        assert_eq!(keywords, vec![Kind::If, Kind::Else, Kind::If]);
    }

    #[test]
    fn test_strings_are_opaque() {
        let tokens = kinds("<?php $a = 'else if (';");
        assert!(tokens.contains(&(Kind::String, "'else if ('".to_string())));
        assert!(!tokens.iter().any(|(k, _)| *k == Kind::Else));
    }

    #[test]
    fn test_escaped_quotes() {
        let tokens = kinds(r#"<?php "a\"b";"#);
        assert_eq!(tokens[1], (Kind::String, r#""a\"b""#.to_string()));
    }

    #[test]
    fn test_doc_comment_classification() {
        let tokens = kinds("<?php /** doc */ /**/ /* c */ /**x*/");
        let comments: Vec<&(Kind, String)> =
            tokens.iter().filter(|(k, _)| *k != Kind::Whitespace).skip(1).collect();
        assert_eq!(comments[0].0, Kind::DocComment);
        assert_eq!(comments[1].0, Kind::Comment);
        assert_eq!(comments[2].0, Kind::Comment);
        assert_eq!(comments[3].0, Kind::Comment);
    }

    #[test]
    fn test_close_tag_returns_to_html() {
        let tokens = kinds("<?php echo 1; ?>\n<b>x</b>");
        let n = tokens.len();
        assert_eq!(tokens[n - 2], (Kind::CloseTag, "?>\n".to_string()));
        assert_eq!(tokens[n - 1], (Kind::InlineHtml, "<b>x</b>".to_string()));
    }

    #[test]
    fn test_line_comment_stops_before_close_tag() {
        let tokens = kinds("<?php // note ?>x");
        assert!(tokens.contains(&(Kind::Comment, "// note ".to_string())));
        assert!(tokens.contains(&(Kind::CloseTag, "?>".to_string())));
    }

    #[test]
    fn test_member_names_are_not_keywords() {
        let tokens = kinds("<?php $a->list; Foo::class; Foo::function(1);");
        assert!(tokens.contains(&(Kind::Identifier, "list".to_string())));
        assert!(tokens.contains(&(Kind::Identifier, "class".to_string())));
        assert!(tokens.contains(&(Kind::Identifier, "function".to_string())));
        assert!(!tokens.iter().any(|(k, _)| matches!(k, Kind::Class | Kind::Function)));
    }

    #[test]
    fn test_nowdoc_is_one_token() {
        let tokens = kinds("<?php\n$s = <<<'EOT'\nelse if\nEOT;\n");
        assert!(tokens.contains(&(Kind::String, "<<<'EOT'\nelse if\nEOT".to_string())));
        assert!(!tokens.iter().any(|(k, _)| *k == Kind::Else));
    }

    #[test]
    fn test_heredoc_is_one_token() {
        let tokens = kinds("<?php\n$s = <<<EOT\nIt's {$a} here\nEOTX\nEOT;\n");
        assert!(tokens.contains(&(
            Kind::String,
            "<<<EOT\nIt's {$a} here\nEOTX\nEOT".to_string()
        )));

        let quoted = kinds("<?php $s = <<<\"EOT\"\r\nx\r\nEOT;");
        assert!(quoted.contains(&(Kind::String, "<<<\"EOT\"\r\nx\r\nEOT".to_string())));
    }

    #[test]
    fn test_indented_heredoc_closing_label() {
        let tokens = kinds("<?php\n    $s = <<<EOT\n        if\n        EOT, 1;\n");
        assert!(tokens.contains(&(
            Kind::String,
            "<<<EOT\n        if\n        EOT".to_string()
        )));
        assert_eq!(tokens.last(), Some(&(Kind::Whitespace, "\n".to_string())));
    }

    #[test]
    fn test_unterminated_heredoc() {
        assert_eq!(
            tokenize("<?php <<<EOT\nnever closed\n"),
            Err(LexError::Unterminated {
                what: "heredoc",
                offset: 6
            })
        );
    }

    #[test]
    fn test_backtick_is_one_token() {
        let tokens = kinds("<?php $out = `ls \\`x\\` else if`;");
        assert!(tokens.contains(&(Kind::String, "`ls \\`x\\` else if`".to_string())));
        assert!(!tokens.iter().any(|(k, _)| *k == Kind::Else));
    }

    #[test]
    fn test_attribute_is_not_a_comment() {
        let tokens = kinds("<?php #[Route('/')] function foo() {} # note");
        assert_eq!(tokens[1], (Kind::AttributeStart, "#[".to_string()));
        assert!(tokens.contains(&(Kind::Function, "function".to_string())));
        assert_eq!(tokens.last(), Some(&(Kind::Comment, "# note".to_string())));
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("<?php $a").unwrap();
        assert_eq!(tokens[1].offset, 6);
    }

    #[test]
    fn test_unterminated_comment() {
        assert_eq!(
            tokenize("<?php /* open"),
            Err(LexError::Unterminated {
                what: "comment",
                offset: 6
            })
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            tokenize("<?php 'abc"),
            Err(LexError::Unterminated { what: "string", .. })
        ));
    }

    #[test]
    fn test_round_trip() {
        let inputs = vec![
            "<?php\nfunction foo($a, $b = true) {}\n",
            "<html><?= $x ?></html>",
            "<?php\n/**\n * @return void\n */\nclass A { use T; }\n",
            "<?php $f = function () use ($b) { return $b ?? 0x1F; };",
        ];
        for input in inputs {
            let tokens = tokenize(input).unwrap();
            assert_eq!(detokenize(&tokens), input, "round trip failed for {:?}", input);
        }
    }
}
