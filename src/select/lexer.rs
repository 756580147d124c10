//! Tokenizer for the selection language.
//!
//! Selection strings are ASCII/UTF-8 text; tokens never span lines and every
//! token remembers its byte offset so parse errors can point at the offending
//! spot. Keywords (`and`, `or`, `not`) are classified here, while every other
//! word stays a plain identifier for the parser to resolve.

use super::error::Error;
use smol_str::SmolStr;

/// Kind of a single lexed token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    Comma,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Neq,
    And,
    Or,
    Not,
    /// Property name, keyword such as `all`, or a bare string value.
    Ident(SmolStr),
    /// Floating point literal, including scientific notation.
    Number(f64),
    /// Positional atom reference `#n`, stored with its 1-based `n`.
    Ref(u8),
}

/// Token paired with its byte offset in the selection text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl Token {
    fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits a selection expression into tokens.
///
/// # Arguments
///
/// * `input` - Expression text, without any `kind:` prefix.
/// * `offset` - Byte offset of `input` inside the full selection string, added
///   to every token position so errors point into the original text.
///
/// # Errors
///
/// Returns [`Error::Parse`] on malformed numbers, stray characters, or a `#`
/// that is not followed by a digit.
pub fn tokenize(input: &str, offset: usize) -> Result<Vec<Token>, Error> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let c = bytes[cursor] as char;
        let position = offset + cursor;

        if c.is_ascii_whitespace() {
            cursor += 1;
            continue;
        }

        match c {
            '(' => {
                tokens.push(Token::new(TokenKind::LParen, position));
                cursor += 1;
            }
            ')' => {
                tokens.push(Token::new(TokenKind::RParen, position));
                cursor += 1;
            }
            ',' => {
                tokens.push(Token::new(TokenKind::Comma, position));
                cursor += 1;
            }
            '<' => {
                if bytes.get(cursor + 1) == Some(&b'=') {
                    tokens.push(Token::new(TokenKind::Le, position));
                    cursor += 2;
                } else {
                    tokens.push(Token::new(TokenKind::Lt, position));
                    cursor += 1;
                }
            }
            '>' => {
                if bytes.get(cursor + 1) == Some(&b'=') {
                    tokens.push(Token::new(TokenKind::Ge, position));
                    cursor += 2;
                } else {
                    tokens.push(Token::new(TokenKind::Gt, position));
                    cursor += 1;
                }
            }
            '=' => {
                if bytes.get(cursor + 1) == Some(&b'=') {
                    tokens.push(Token::new(TokenKind::Eq, position));
                    cursor += 2;
                } else {
                    return Err(Error::parse("expected '==' but found a single '='", position));
                }
            }
            '!' => {
                if bytes.get(cursor + 1) == Some(&b'=') {
                    tokens.push(Token::new(TokenKind::Neq, position));
                    cursor += 2;
                } else {
                    return Err(Error::parse("expected '!=' but found a single '!'", position));
                }
            }
            '#' => {
                let start = cursor + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end == start {
                    return Err(Error::parse("expected a digit after '#'", position));
                }
                let digits = &input[start..end];
                let value: u8 = digits.parse().map_err(|_| {
                    Error::parse(format!("reference '#{}' is too large", digits), position)
                })?;
                tokens.push(Token::new(TokenKind::Ref(value), position));
                cursor = end;
            }
            _ if is_ident_start(c) => {
                let start = cursor;
                while cursor < bytes.len() && is_ident_continue(bytes[cursor] as char) {
                    cursor += 1;
                }
                let word = &input[start..cursor];
                let kind = match word {
                    "and" => TokenKind::And,
                    "or" => TokenKind::Or,
                    "not" => TokenKind::Not,
                    _ => TokenKind::Ident(SmolStr::new(word)),
                };
                tokens.push(Token::new(kind, position));
            }
            _ if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' => {
                let start = cursor;
                cursor = scan_number(bytes, cursor);
                let text = &input[start..cursor];
                let value: f64 = text.parse().map_err(|_| {
                    Error::parse(format!("could not parse number '{}'", text), position)
                })?;
                tokens.push(Token::new(TokenKind::Number(value), position));
            }
            _ => {
                return Err(Error::parse(
                    format!("unexpected character '{}'", c),
                    position,
                ));
            }
        }
    }

    Ok(tokens)
}

/// Advances past a numeric literal: sign, digits, decimal point, exponent.
fn scan_number(bytes: &[u8], mut cursor: usize) -> usize {
    if matches!(bytes.get(cursor), Some(b'-') | Some(b'+')) {
        cursor += 1;
    }
    while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
        cursor += 1;
    }
    if bytes.get(cursor) == Some(&b'.') {
        cursor += 1;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
    }
    if matches!(bytes.get(cursor), Some(b'e') | Some(b'E')) {
        let mut lookahead = cursor + 1;
        if matches!(bytes.get(lookahead), Some(b'-') | Some(b'+')) {
            lookahead += 1;
        }
        if bytes.get(lookahead).is_some_and(|b| b.is_ascii_digit()) {
            cursor = lookahead;
            while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
                cursor += 1;
            }
        }
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input, 0)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_keywords_and_identifiers() {
        assert_eq!(
            kinds("name H and not all"),
            vec![
                TokenKind::Ident(SmolStr::new("name")),
                TokenKind::Ident(SmolStr::new("H")),
                TokenKind::And,
                TokenKind::Not,
                TokenKind::Ident(SmolStr::new("all")),
            ]
        );
    }

    #[test]
    fn tokenizes_comparison_operators() {
        assert_eq!(
            kinds("< <= > >= == !="),
            vec![
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
                TokenKind::Eq,
                TokenKind::Neq,
            ]
        );
    }

    #[test]
    fn tokenizes_references_and_parentheses() {
        assert_eq!(
            kinds("name(#2) O"),
            vec![
                TokenKind::Ident(SmolStr::new("name")),
                TokenKind::LParen,
                TokenKind::Ref(2),
                TokenKind::RParen,
                TokenKind::Ident(SmolStr::new("O")),
            ]
        );
    }

    #[test]
    fn tokenizes_numbers_in_every_shape() {
        assert_eq!(
            kinds("3 3.4 -0.5 +2. 1e3 2.5e-2"),
            vec![
                TokenKind::Number(3.0),
                TokenKind::Number(3.4),
                TokenKind::Number(-0.5),
                TokenKind::Number(2.0),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.025),
            ]
        );
    }

    #[test]
    fn positions_point_into_the_input() {
        let tokens = tokenize("mass < 3.4", 0).unwrap();
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 5);
        assert_eq!(tokens[2].position, 7);
    }

    #[test]
    fn positions_honor_the_offset() {
        let tokens = tokenize("all", 7).unwrap();
        assert_eq!(tokens[0].position, 7);
    }

    #[test]
    fn rejects_single_equals_and_bang() {
        assert_eq!(
            tokenize("mass = 3", 0),
            Err(Error::parse("expected '==' but found a single '='", 5))
        );
        assert!(matches!(
            tokenize("mass ! 3", 0),
            Err(Error::Parse { position: 5, .. })
        ));
    }

    #[test]
    fn rejects_hash_without_digit() {
        assert_eq!(
            tokenize("name(#x)", 0),
            Err(Error::parse("expected a digit after '#'", 5))
        );
    }

    #[test]
    fn rejects_stray_characters() {
        assert!(matches!(
            tokenize("name @ H", 0),
            Err(Error::Parse { position: 5, .. })
        ));
    }

    #[test]
    fn rejects_oversized_references() {
        assert!(matches!(
            tokenize("name(#999)", 0),
            Err(Error::Parse { position: 5, .. })
        ));
    }
}
