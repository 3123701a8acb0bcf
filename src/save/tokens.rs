//! Whitespace token reader for the text record format
//!
//! Records are read token by token rather than line by line: a token may sit on
//! any line, the same way formatted extraction from a text stream behaves.

use std::collections::VecDeque;
use std::io::BufRead;
use std::str::FromStr;

use super::types::SaveError;

/// Pulls whitespace-separated tokens out of a buffered reader on demand
pub struct TokenReader<'a> {
    input: &'a mut dyn BufRead,
    line: String,
    pending: VecDeque<String>,
}

impl<'a> TokenReader<'a> {
    pub fn new(input: &'a mut dyn BufRead) -> Self {
        TokenReader {
            input,
            line: String::new(),
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, or `None` once the input is exhausted
    pub fn next_token(&mut self) -> Result<Option<String>, SaveError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(self.line.split_whitespace().map(str::to_owned));
        }
    }

    /// Returns the next token, treating end of input as a missing `field`
    pub fn expect_token(&mut self, field: &'static str) -> Result<String, SaveError> {
        self.next_token()?
            .ok_or(SaveError::MissingField { field })
    }

    /// Reads the next token and converts it to `T`
    pub fn parse_field<T: FromStr>(&mut self, field: &'static str) -> Result<T, SaveError> {
        let token = self.expect_token(field)?;
        token
            .parse::<T>()
            .map_err(|_| SaveError::InvalidField { field, token })
    }
}
