//! # sift
//!
//! A compiler front-end for the sift item-filter DSL.
//!
//! The crate is split into a generic substrate (scanner, rule-driven lexer,
//! combinator parser, tree post-processing, transformation and validation)
//! and the concrete sift binding that instantiates it. See the
//! [sift module](sift) for the full module tree.
//!
//! ## Testing
//!
//! Parser and validator tests use the fluent assertion API in
//! [sift::testing]; see the `tests/` suites for the DSL-level scenarios.

pub mod sift;
