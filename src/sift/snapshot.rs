//! Tree snapshot - a normalized, serializable form of the parse tree
//!
//! The snapshot flattens the generic token kind to its debug name so any
//! parse tree can be serialized without carrying the kind type parameter.
//! Serializers and test assertions work against this form instead of
//! reimplementing tree traversal.

use crate::sift::parsing::ParseTree;
use crate::sift::token::TokenKind;
use serde::{Deserialize, Serialize};

/// A snapshot of one parse-tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// The node's symbol (e.g. "metadata", "assignment", "field")
    pub symbol: String,

    /// Debug name of the token kind, for leaves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_kind: Option<String>,

    /// Exact matched runes of the token, for leaves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_value: Option<String>,

    /// Child snapshots in tree order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeSnapshot>,
}

impl TreeSnapshot {
    /// Capture a parse tree as a snapshot
    pub fn from_tree<K: TokenKind>(tree: &ParseTree<K>) -> Self {
        TreeSnapshot {
            symbol: tree.symbol.clone(),
            token_kind: tree.token.as_ref().map(|t| format!("{:?}", t.kind)),
            token_value: tree.token.as_ref().map(|t| t.value.clone()),
            children: tree.children.iter().map(TreeSnapshot::from_tree).collect(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
