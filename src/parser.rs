use failure::Error;
use std::fmt;

use crate::errors::{LexError, SyntaxError};
use crate::values::Value::{self, *};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Item(String),
    Str(String),
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Item(text) => write!(f, "{}", text),
            Token::Str(text) => write!(f, "\"{}\"", text),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

/// slice a string of code into individual "bits" of syntax. parens always
/// stand alone, whitespace only separates, a double quote runs a string
/// literal to the next double quote (no escapes), and everything else
/// accumulates into atom text
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut item = String::new();
    let mut chars = source.chars();

    while let Some(c) = chars.next() {
        match c {
            '(' => {
                push_item(&mut item, &mut tokens);
                tokens.push(Token::LeftParen);
            }

            ')' => {
                push_item(&mut item, &mut tokens);
                tokens.push(Token::RightParen);
            }

            '"' => {
                push_item(&mut item, &mut tokens);
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(inner) => text.push(inner),
                        None => Err(LexError::UnterminatedString)?,
                    }
                }
                tokens.push(Token::Str(text));
            }

            c if c.is_whitespace() => push_item(&mut item, &mut tokens),

            _ => item.push(c),
        }
    }

    push_item(&mut item, &mut tokens);
    Ok(tokens)
}

fn push_item(item: &mut String, tokens: &mut Vec<Token>) {
    if !item.is_empty() {
        tokens.push(Token::Item(item.clone()));
        item.clear();
    }
}

impl Value {
    /// parse one expression off the front of the token stream, consuming
    /// exactly the tokens that form it and leaving the rest for the next
    /// call
    pub fn from_tokens(tokens: &mut Vec<Token>) -> Result<Value, Error> {
        if tokens.is_empty() {
            Err(SyntaxError::UnexpectedEndOfInput)?
        }

        match tokens.remove(0) {
            Token::LeftParen => {
                let mut list: Vec<Value> = Vec::new();

                loop {
                    match tokens.first() {
                        Some(Token::RightParen) => {
                            tokens.remove(0);
                            return Ok(List(list));
                        }
                        Some(_) => list.push(Value::from_tokens(tokens)?),
                        None => Err(SyntaxError::UnterminatedList)?,
                    }
                }
            }

            Token::RightParen => Err(SyntaxError::UnexpectedCloseParen)?,

            Token::Str(text) => Ok(Str(text)),

            Token::Item(text) => Ok(Value::atomize(text)),
        }
    }

    /// classify an atom's text: boolean, then integer, then float, then
    /// symbol. a failed numeric parse is not an error, just the cue to
    /// fall through
    fn atomize(token: String) -> Value {
        match token.as_str() {
            "#t" => Bool(true),
            "#f" => Bool(false),
            _ => {
                if let Ok(n) = token.parse::<i64>() {
                    Integer(n)
                } else if looks_numeric(&token) {
                    match token.parse::<f64>() {
                        Ok(x) => Float(x),
                        Err(_) => Symbol(token),
                    }
                } else {
                    Symbol(token)
                }
            }
        }
    }
}

/// gate on the shape the float parser should see: an optional sign, then
/// a digit or a point-then-digit. keeps `inf`, `nan` and friends symbols,
/// which rust's f64 parser would otherwise happily accept
fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix('+').or_else(|| token.strip_prefix('-')).unwrap_or(token);
    let mut chars = digits.chars();

    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.next().map_or(false, |c| c.is_ascii_digit()),
        _ => false,
    }
}

// }}}
