//! Decoder for the textual `ners` column
//!
//! The extraction step upstream writes each episode's mentions as a nested
//! literal: an outer list of sentences, each sentence a list, tuple or set of
//! quoted names, e.g. `[['Naruto', 'Sasuke'], [], {'Kakashi'}, set()]`.

use super::record::Sentence;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// A malformed mention encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed mention encoding at offset {offset}: {reason}")]
pub struct DecodeError {
    /// Byte offset into the encoded text
    pub offset: usize,
    pub reason: String,
}

/// Decode one episode's `ners` cell into sentences.
pub fn decode_mentions(text: &str) -> Result<Vec<Sentence>, DecodeError> {
    let mut parser = Parser::new(text);
    let sentences = parser.sequence(|p| p.sequence(Parser::string).map(Sentence::new))?;

    parser.skip_ws();
    if let Some((offset, c)) = parser.peek() {
        return Err(DecodeError {
            offset,
            reason: format!("unexpected trailing '{}'", c),
        });
    }
    Ok(sentences)
}

struct Parser<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn offset(&mut self) -> usize {
        self.peek().map(|(i, _)| i).unwrap_or(self.text.len())
    }

    fn error<T>(&mut self, reason: impl Into<String>) -> Result<T, DecodeError> {
        Err(DecodeError {
            offset: self.offset(),
            reason: reason.into(),
        })
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    /// `[a, b]`, `(a, b)`, `{a, b}` or `set()`, trailing comma allowed.
    fn sequence<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        self.skip_ws();
        let start = self.offset();
        if self.text[start..].starts_with("set()") {
            for _ in 0.."set()".len() {
                self.chars.next();
            }
            return Ok(Vec::new());
        }

        let close = match self.peek() {
            Some((_, '[')) => ']',
            Some((_, '(')) => ')',
            Some((_, '{')) => '}',
            Some((_, c)) => return self.error(format!("expected a list, found '{}'", c)),
            None => return self.error("expected a list, found end of input"),
        };
        self.chars.next();

        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if matches!(self.peek(), Some((_, c)) if c == close) {
                self.chars.next();
                return Ok(items);
            }

            items.push(item(self)?);

            self.skip_ws();
            match self.peek() {
                Some((_, ',')) => {
                    self.chars.next();
                }
                Some((_, c)) if c == close => {
                    self.chars.next();
                    return Ok(items);
                }
                Some((_, c)) => {
                    return self.error(format!("expected ',' or '{}', found '{}'", close, c))
                }
                None => return self.error(format!("unterminated list, expected '{}'", close)),
            }
        }
    }

    /// A single- or double-quoted string with backslash escapes.
    fn string(&mut self) -> Result<String, DecodeError> {
        self.skip_ws();
        let quote = match self.peek() {
            Some((_, q @ ('\'' | '"'))) => q,
            Some((_, c)) => return self.error(format!("expected a quoted name, found '{}'", c)),
            None => return self.error("expected a quoted name, found end of input"),
        };
        self.chars.next();

        let mut out = String::new();
        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => return Ok(out),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, c @ ('\\' | '\'' | '"'))) => out.push(c),
                    Some((_, c)) => {
                        out.push('\\');
                        out.push(c);
                    }
                    None => return self.error("unterminated escape"),
                },
                Some((_, c)) => out.push(c),
                None => return self.error("unterminated string"),
            }
        }
    }
}
