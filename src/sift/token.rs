//! Token definitions for the sift front-end
//!
//! The framework is generic over a caller-supplied token kind; `TokenKind`
//! pins down the minimal bound set. The caller designates one kind value as
//! the ignore sentinel, which the parser filters out before matching.

use std::fmt;
use std::hash::Hash;

/// Bound set for user-supplied token kind enums
pub trait TokenKind: Copy + Eq + Hash + fmt::Debug {}

impl<T: Copy + Eq + Hash + fmt::Debug> TokenKind for T {}

/// A (kind, value) pair produced by the lexer.
///
/// The value holds the exact matched runes. Tokens carry no line/column
/// information; position is an opaque input offset known only to errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K: TokenKind> {
    pub kind: K,
    pub value: String,
}

impl<K: TokenKind> Token<K> {
    /// Create a token from a kind and its matched runes
    pub fn new(kind: K, value: impl Into<String>) -> Self {
        Token {
            kind,
            value: value.into(),
        }
    }

    /// Check the token's kind
    pub fn is_kind(&self, kind: K) -> bool {
        self.kind == kind
    }

    /// Check the token's kind against a set of kinds
    pub fn is_any_kind(&self, kinds: &[K]) -> bool {
        kinds.contains(&self.kind)
    }
}

impl<K: TokenKind> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.value)
    }
}
