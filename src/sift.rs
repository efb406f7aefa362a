//! The sift compiler front-end.
//!
//! Module layout, leaves first:
//!
//! 1. [scanner] - a rune buffer with a one-position cursor
//! 2. [token] - the `Token` type and the `TokenKind` bound
//! 3. [lexing] - rule objects and the first-match-wins lexer loop
//! 4. [parsing] - parsing combinators, the parse tree and the parser driver
//! 5. [postprocess] - symbol filtering and empty-node pruning
//! 6. [transform] - the two-phase tree walker
//! 7. [validate] - the validator trait and pipeline
//! 8. [snapshot] - a serializable snapshot form of the parse tree
//! 9. [dsl] - the concrete sift lexical rules, grammar and validators
//!
//! Everything above [dsl] is generic over a caller-supplied token kind; the
//! sift binding is one instantiation of it.

pub mod dsl;
pub mod error;
pub mod lexing;
pub mod parsing;
pub mod postprocess;
pub mod scanner;
pub mod snapshot;
pub mod testing;
pub mod token;
pub mod transform;
pub mod validate;
