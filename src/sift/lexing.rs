//! Rule-driven lexing
//!
//! The lexer iterates an ordered rule list against the scanner:
//!
//! 1. Find the first rule that matches at the current cursor.
//! 2. If none matches, fail with `no matching rule found` (fatal).
//! 3. Ask the matching rule for a token and a consumed rune count.
//! 4. Advance the scanner by that count.
//! 5. Emit the token regardless of kind; ignored kinds are filtered at the
//!    parser boundary, not here.
//!
//! Order in the rule list is the resolution order, so longer and more
//! specific rules (keywords, multi-rune operators) must come before their
//! prefix subsets.

pub mod rules;

use crate::sift::error::LexError;
use crate::sift::scanner::Scanner;
use crate::sift::token::{Token, TokenKind};
use rules::LexingRule;

/// A scanner plus an ordered ruleset, driven to a token stream
pub struct Lexer<K: TokenKind> {
    scanner: Scanner,
    rules: Vec<Box<dyn LexingRule<K>>>,
}

impl<K: TokenKind> Lexer<K> {
    /// Create a lexer over a scanner with the given resolution-ordered rules
    pub fn new(scanner: Scanner, rules: Vec<Box<dyn LexingRule<K>>>) -> Self {
        Lexer { scanner, rules }
    }

    /// Drive the ruleset to completion and return the token stream.
    ///
    /// Token order in the output is input order. The lexer is stateless
    /// between calls apart from the scanner cursor; call [Lexer::reset]
    /// before re-lexing.
    pub fn get_tokens(&mut self) -> Result<Vec<Token<K>>, LexError> {
        let mut tokens = Vec::new();
        while !self.scanner.at_end() {
            let rule = self
                .rules
                .iter()
                .find(|rule| rule.is_match(&self.scanner))
                .ok_or(LexError::NoMatchingRule {
                    position: self.scanner.position(),
                })?;
            let extraction = rule.extract(&self.scanner)?;
            if extraction.consumed == 0 {
                return Err(LexError::EmptyExtraction {
                    symbol: rule.symbol().to_string(),
                });
            }
            self.scanner.consume(extraction.consumed)?;
            tokens.push(extraction.token);
        }
        Ok(tokens)
    }

    /// Rewind the scanner to the start of the input
    pub fn reset(&mut self) {
        self.scanner.reset();
    }

    /// Current scanner offset, for diagnostics
    pub fn position(&self) -> usize {
        self.scanner.position()
    }
}
