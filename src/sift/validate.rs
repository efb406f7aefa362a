//! Validator trait and pipeline
//!
//! A validator is one check over a finished parse tree. The pipeline runs
//! validators in order and short-circuits on the first error; there is no
//! error list and no recovery. Concrete sift validators live in
//! [crate::sift::dsl::validators].

use crate::sift::error::ValidationError;
use crate::sift::parsing::ParseTree;
use crate::sift::token::TokenKind;

/// A single composable check over the parse tree
pub trait Validator<K: TokenKind> {
    /// Diagnostic name of this validator
    fn name(&self) -> &str;

    /// Check the tree; the first failure is the validator's verdict
    fn validate(&self, tree: &ParseTree<K>) -> Result<(), ValidationError>;
}

/// Run validators in order, returning the first error
pub fn run_pipeline<K: TokenKind>(
    tree: &ParseTree<K>,
    validators: &[Box<dyn Validator<K>>],
) -> Result<(), ValidationError> {
    for validator in validators {
        validator.validate(tree)?;
    }
    Ok(())
}
