use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::ParseError;
use crate::models::{Operation, Value};

/// Kind of a lexical token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(Value),
    Identifier(String),
    Operator(Operation),
    LeftParen,
    RightParen,
    Equals,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "{}", value),
            TokenKind::Identifier(name) => write!(f, "{}", name),
            TokenKind::Operator(op) => write!(f, "{}", op.symbol()),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Equals => write!(f, "="),
        }
    }
}

/// A token together with its byte offset in the input
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Split an expression into tokens
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(position, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let kind = if ch.is_ascii_digit() || ch == '.' {
            lex_number(input, &mut chars)?
        } else if ch.is_alphabetic() || ch == '_' {
            lex_identifier(input, &mut chars)
        } else {
            chars.next();
            match ch {
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                '=' => TokenKind::Equals,
                other => match Operation::from_symbol(other) {
                    Some(op) => TokenKind::Operator(op),
                    None => return Err(ParseError::UnexpectedChar { ch: other, position }),
                },
            }
        };

        tokens.push(Token { kind, position });
    }

    Ok(tokens)
}

fn lex_number(input: &str, chars: &mut Peekable<CharIndices<'_>>) -> Result<TokenKind, ParseError> {
    let start = chars.peek().map(|&(i, _)| i).unwrap_or(input.len());
    let mut end = start;
    let mut seen_dot = false;
    let mut seen_exponent = false;

    while let Some(&(i, ch)) = chars.peek() {
        if ch.is_ascii_digit() {
            chars.next();
            end = i + 1;
        } else if ch == '.' && !seen_dot && !seen_exponent {
            seen_dot = true;
            chars.next();
            end = i + 1;
        } else if (ch == 'e' || ch == 'E') && !seen_exponent && has_exponent_digits(&input[i + 1..]) {
            seen_exponent = true;
            chars.next();
            end = i + 1;
            if let Some(&(j, sign)) = chars.peek() {
                if sign == '+' || sign == '-' {
                    chars.next();
                    end = j + 1;
                }
            }
        } else {
            break;
        }
    }

    let literal = &input[start..end];
    if !seen_dot && !seen_exponent {
        // Integers too large for i64 degrade to decimals
        if let Ok(n) = literal.parse::<i64>() {
            return Ok(TokenKind::Number(Value::Integer(n)));
        }
    }
    // Literals beyond the f64 range would parse as infinity
    match literal.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(TokenKind::Number(Value::Decimal(x))),
        _ => Err(ParseError::InvalidNumber(literal.to_string())),
    }
}

/// An exponent marker only counts when digits follow, optionally after a sign
fn has_exponent_digits(rest: &str) -> bool {
    let rest = rest
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(rest);
    rest.starts_with(|c: char| c.is_ascii_digit())
}

fn lex_identifier(input: &str, chars: &mut Peekable<CharIndices<'_>>) -> TokenKind {
    let start = chars.peek().map(|&(i, _)| i).unwrap_or(input.len());
    let mut end = start;
    while let Some(&(i, ch)) = chars.peek() {
        if ch.is_alphanumeric() || ch == '_' {
            chars.next();
            end = i + ch.len_utf8();
        } else {
            break;
        }
    }
    TokenKind::Identifier(input[start..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_simple_expression() {
        assert_eq!(
            kinds("1 + 2"),
            vec![
                TokenKind::Number(Value::Integer(1)),
                TokenKind::Operator(Operation::Add),
                TokenKind::Number(Value::Integer(2)),
            ]
        );
    }

    #[test]
    fn test_tokenize_decimals_and_exponents() {
        assert_eq!(
            kinds("3.5 .5 1e3 2.5E-2"),
            vec![
                TokenKind::Number(Value::Decimal(3.5)),
                TokenKind::Number(Value::Decimal(0.5)),
                TokenKind::Number(Value::Decimal(1000.0)),
                TokenKind::Number(Value::Decimal(0.025)),
            ]
        );
    }

    #[test]
    fn test_exponent_requires_digits() {
        assert_eq!(
            kinds("2e"),
            vec![
                TokenKind::Number(Value::Integer(2)),
                TokenKind::Identifier("e".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_identifiers_and_parens() {
        assert_eq!(
            kinds("sqrt(x_1)"),
            vec![
                TokenKind::Identifier("sqrt".to_string()),
                TokenKind::LeftParen,
                TokenKind::Identifier("x_1".to_string()),
                TokenKind::RightParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_huge_integer_becomes_decimal() {
        assert_eq!(
            kinds("99999999999999999999"),
            vec![TokenKind::Number(Value::Decimal(1e20))]
        );
    }

    #[test]
    fn test_out_of_range_literals_are_invalid() {
        assert_eq!(
            tokenize("1e309"),
            Err(ParseError::InvalidNumber("1e309".to_string()))
        );

        let digits = "9".repeat(400);
        assert_eq!(
            tokenize(&format!("1 + {}", digits)),
            Err(ParseError::InvalidNumber(digits))
        );

        assert_eq!(kinds("1e308"), vec![TokenKind::Number(Value::Decimal(1e308))]);
    }

    #[test]
    fn test_token_positions() {
        let tokens = tokenize("10 * x").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 3, 5]);
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            tokenize("1 $ 2"),
            Err(ParseError::UnexpectedChar { ch: '$', position: 2 })
        );
    }

    #[test]
    fn test_lone_dot_is_invalid_number() {
        assert_eq!(tokenize("."), Err(ParseError::InvalidNumber(".".to_string())));
    }
}
