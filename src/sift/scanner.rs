//! Positional scanner over a rune buffer
//!
//! The scanner owns an immutable rune (char) sequence and a single cursor.
//! Lexing rules read through it with `current` / `peek_at` / `peek`; only
//! `consume`, `pushback` and `reset` move the cursor. A terminating newline
//! is appended at construction iff the input does not already end with one,
//! so rules that run to end-of-line behave the same on the last line as on
//! interior lines. The synthetic newline is ordinary input: rules see it and
//! `position` counts it.

use crate::sift::error::ScanError;
use std::io::Read;

/// A rune buffer with a one-position cursor
#[derive(Debug, Clone)]
pub struct Scanner {
    runes: Vec<char>,
    cursor: usize,
}

impl Scanner {
    /// Create a scanner over the given source text
    pub fn new(source: &str) -> Self {
        let mut runes: Vec<char> = source.chars().collect();
        if runes.last() != Some(&'\n') {
            runes.push('\n');
        }
        Scanner { runes, cursor: 0 }
    }

    /// Create a scanner by reading and decoding a byte source
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Scanner::new(&source))
    }

    /// A one-rune probe scanner, used to test a single rune against a rule.
    /// No terminating newline is appended.
    pub(crate) fn single(rune: char) -> Self {
        Scanner {
            runes: vec![rune],
            cursor: 0,
        }
    }

    /// The rune under the cursor
    pub fn current(&self) -> Result<char, ScanError> {
        self.runes
            .get(self.cursor)
            .copied()
            .ok_or(ScanError::EndOfInput {
                position: self.cursor,
            })
    }

    /// The rune `offset` positions ahead of the cursor (offset 0 = current)
    pub fn peek_at(&self, offset: usize) -> Result<char, ScanError> {
        self.runes
            .get(self.cursor + offset)
            .copied()
            .ok_or(ScanError::EndOfInput {
                position: self.cursor + offset,
            })
    }

    /// The next `n` runes after the current one (offsets 1..=n).
    /// Fails if fewer than `n` remain.
    pub fn peek(&self, n: usize) -> Result<Vec<char>, ScanError> {
        if self.cursor + n >= self.runes.len() {
            return Err(ScanError::EndOfInput {
                position: self.cursor + n,
            });
        }
        Ok(self.runes[self.cursor + 1..=self.cursor + n].to_vec())
    }

    /// Advance the cursor by `n`, returning the consumed runes
    pub fn consume(&mut self, n: usize) -> Result<Vec<char>, ScanError> {
        if self.cursor + n > self.runes.len() {
            return Err(ScanError::EndOfInput {
                position: self.runes.len(),
            });
        }
        let consumed = self.runes[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        Ok(consumed)
    }

    /// Retract the cursor by `n`
    pub fn pushback(&mut self, n: usize) -> Result<(), ScanError> {
        if n > self.cursor {
            return Err(ScanError::CursorUnderflow {
                position: self.cursor,
                requested: n,
            });
        }
        self.cursor -= n;
        Ok(())
    }

    /// Return the cursor to the start of the buffer
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Opaque offset for diagnostics
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// True once the cursor has passed the last rune
    pub fn at_end(&self) -> bool {
        self.cursor >= self.runes.len()
    }

    /// Total number of runes, including the synthetic trailing newline
    pub fn len(&self) -> usize {
        self.runes.len()
    }

    /// True if the buffer holds no runes at all
    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }
}
