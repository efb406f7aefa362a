//! Two-phase tree transformation
//!
//! 1. Discovery: a depth-first pre-order traversal asks the caller's
//!    dispatcher for a callback and an order key at every node, recording
//!    hits in a schedule keyed by order key.
//! 2. Firing: order keys fire ascending; within a key, callbacks fire in
//!    the order their nodes were discovered.
//!
//! The tree is never mutated. Callbacks mutate external state they own,
//! which is why they are shared `FnMut` closures behind `Rc<RefCell<..>>`;
//! the front end is single-threaded throughout.

use crate::sift::parsing::ParseTree;
use crate::sift::token::TokenKind;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A callback fired with the node it was registered for
pub type NodeCallback<'t, K> = Rc<RefCell<dyn FnMut(&ParseTree<K>) + 't>>;

/// One discovery pass followed by one firing pass over the tree.
///
/// The dispatcher maps a node to `None` (no interest) or to a callback and
/// the order key it should fire under.
pub fn transform<'t, K, D>(tree: &'t ParseTree<K>, mut dispatcher: D)
where
    K: TokenKind,
    D: FnMut(&ParseTree<K>) -> Option<(NodeCallback<'t, K>, u32)>,
{
    let mut schedule: BTreeMap<u32, Vec<(NodeCallback<'t, K>, &'t ParseTree<K>)>> =
        BTreeMap::new();
    discover(tree, &mut dispatcher, &mut schedule);
    for entries in schedule.into_values() {
        for (callback, node) in entries {
            (callback.borrow_mut())(node);
        }
    }
}

fn discover<'t, K, D>(
    node: &'t ParseTree<K>,
    dispatcher: &mut D,
    schedule: &mut BTreeMap<u32, Vec<(NodeCallback<'t, K>, &'t ParseTree<K>)>>,
) where
    K: TokenKind,
    D: FnMut(&ParseTree<K>) -> Option<(NodeCallback<'t, K>, u32)>,
{
    if let Some((callback, order_key)) = dispatcher(node) {
        schedule.entry(order_key).or_default().push((callback, node));
    }
    for child in &node.children {
        discover(child, dispatcher, schedule);
    }
}

/// Plain pre-order walk, for callers that need traversal without scheduling
pub fn walk<K: TokenKind>(tree: &ParseTree<K>, visit: &mut impl FnMut(&ParseTree<K>)) {
    visit(tree);
    for child in &tree.children {
        walk(child, visit);
    }
}
