//! Fluent assertion API for parse trees
//!
//! Test-support helpers used by the integration suites. The builders keep
//! failure messages pointed at the path into the tree instead of a bare
//! `assert!` on a deeply-indexed expression.

use crate::sift::parsing::ParseTree;
use crate::sift::token::TokenKind;

/// Create an assertion builder for a tree node
pub fn assert_tree<K: TokenKind>(tree: &ParseTree<K>) -> TreeAssertion<'_, K> {
    TreeAssertion {
        node: tree,
        context: tree.symbol.clone(),
    }
}

pub struct TreeAssertion<'a, K: TokenKind> {
    node: &'a ParseTree<K>,
    context: String,
}

impl<'a, K: TokenKind> TreeAssertion<'a, K> {
    /// Assert the node's symbol
    pub fn symbol(self, expected: &str) -> Self {
        assert_eq!(
            self.node.symbol, expected,
            "{}: expected symbol {:?}, found {:?}",
            self.context, expected, self.node.symbol
        );
        self
    }

    /// Assert the number of children
    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: expected {} children, found {} ({})",
            self.context,
            expected,
            actual,
            summarize(self.node)
        );
        self
    }

    /// Assert the token value carried by this leaf
    pub fn token_value(self, expected: &str) -> Self {
        let actual = self
            .node
            .token
            .as_ref()
            .unwrap_or_else(|| panic!("{}: node carries no token", self.context));
        assert_eq!(
            actual.value, expected,
            "{}: expected token value {:?}, found {:?}",
            self.context, expected, actual.value
        );
        self
    }

    /// Assert the token kind carried by this leaf
    pub fn token_kind(self, expected: K) -> Self {
        let actual = self
            .node
            .token
            .as_ref()
            .unwrap_or_else(|| panic!("{}: node carries no token", self.context));
        assert_eq!(
            actual.kind, expected,
            "{}: expected token kind {:?}, found {:?}",
            self.context, expected, actual.kind
        );
        self
    }

    /// Descend into the child at `index`. The closure may return its
    /// builder or nothing; either way assertions run inside it.
    pub fn child<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a, K>) -> R,
    {
        assert!(
            index < self.node.children.len(),
            "{}: child index {} out of bounds ({} children)",
            self.context,
            index,
            self.node.children.len()
        );
        let child = &self.node.children[index];
        let _ = assertion(TreeAssertion {
            node: child,
            context: format!("{}.children[{}]({})", self.context, index, child.symbol),
        });
        self
    }

    /// Descend into the first child with the given symbol
    pub fn named_child<F, R>(self, symbol: &str, assertion: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a, K>) -> R,
    {
        let child = self.node.child(symbol).unwrap_or_else(|| {
            panic!(
                "{}: no child named {:?} ({})",
                self.context,
                symbol,
                summarize(self.node)
            )
        });
        let _ = assertion(TreeAssertion {
            node: child,
            context: format!("{}.{}", self.context, symbol),
        });
        self
    }

    /// Assert that some child carries the given symbol
    pub fn has_child(self, symbol: &str) -> Self {
        assert!(
            self.node.child(symbol).is_some(),
            "{}: expected a child named {:?} ({})",
            self.context,
            symbol,
            summarize(self.node)
        );
        self
    }
}

fn summarize<K: TokenKind>(node: &ParseTree<K>) -> String {
    let symbols: Vec<&str> = node
        .children
        .iter()
        .map(|child| child.symbol.as_str())
        .collect();
    format!("children: [{}]", symbols.join(", "))
}
