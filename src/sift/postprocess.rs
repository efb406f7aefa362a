//! Parse-tree post-processing
//!
//! Two pure, non-destructive transformations. Both return fresh trees and
//! preserve the relative order of retained children; the source's split
//! between "filter by symbol" and "remove empty" is kept so callers can
//! choose either pass independently. Both passes are idempotent.

use crate::sift::parsing::ParseTree;
use crate::sift::token::TokenKind;

/// Copy the tree, dropping every node (and its subtree) whose symbol is in
/// the filtered set. Returns `None` when the root itself is filtered.
pub fn filter_symbols<K: TokenKind>(
    tree: &ParseTree<K>,
    filtered: &[&str],
) -> Option<ParseTree<K>> {
    if filtered.contains(&tree.symbol.as_str()) {
        return None;
    }
    let children = tree
        .children
        .iter()
        .filter_map(|child| filter_symbols(child, filtered))
        .collect();
    Some(ParseTree {
        symbol: tree.symbol.clone(),
        token: tree.token.clone(),
        children,
    })
}

/// Copy the tree, dropping bottom-up every node that carries no token and
/// has no remaining children. A node becomes empty if all its descendants
/// are removed. Returns `None` when the whole tree collapses.
pub fn prune_empty<K: TokenKind>(tree: &ParseTree<K>) -> Option<ParseTree<K>> {
    let children: Vec<ParseTree<K>> = tree
        .children
        .iter()
        .filter_map(prune_empty)
        .collect();
    if tree.token.is_none() && children.is_empty() {
        return None;
    }
    Some(ParseTree {
        symbol: tree.symbol.clone(),
        token: tree.token.clone(),
        children,
    })
}
