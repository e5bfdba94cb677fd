//! Iterative walkers over expression trees.
//!
//! This module provides two traversal helpers:
//! - [`walk`]: pass an initial input of any type to your visitor; each node can schedule which
//!   children to visit next with their own input values.
//! - [`walk_no_input`]: a convenience wrapper when you don't need to thread user state.
//!
//! Traversal strategy
//! - Iteration over an explicit stack (no recursion), so arbitrarily deep trees are fine.
//! - You are in control: only children for which you call
//!   [`WalkerNodeHandle::schedule_visit`] are traversed.
//!
//! Example: count nodes in an expression
//! ```
//! use hyeval::expr::func::*;
//! use hyeval::walker::walk_no_input;
//!
//! let expr = constant(true) & !constant(false);
//! let mut count = 0usize;
//! walk_no_input(&expr, |node| {
//!     node.schedule_children(());
//!     count += 1;
//! });
//! assert_eq!(count, 4);
//! assert_eq!(count, expr.node_count());
//! ```
//!
//! Example: prune at the first negation
//! ```
//! use hyeval::expr::func::*;
//! use hyeval::expr::variant::ExprType;
//! use hyeval::walker::{walk_no_input, WalkerView};
//!
//! let expr = or(not(variable("a").unwrap()), variable("b").unwrap());
//! let mut seen = Vec::new();
//! walk_no_input(&expr, |node| {
//!     seen.push(node.type_());
//!     if let WalkerView::Binary(l, r) = node.view() {
//!         r.schedule_visit(());
//!         l.schedule_visit(());
//!     }
//! });
//! assert_eq!(seen, [ExprType::Or, ExprType::Negation, ExprType::Variable]);
//! ```
mod handle;
mod internal;

use std::collections::BTreeSet;

pub use handle::*;

use crate::expr::Expression;

/// Count the nodes of `expr` by visiting every one of them.
///
/// Always equal to [`Expression::node_count`]; useful to check that invariant.
pub fn count_nodes(expr: &Expression) -> usize {
    let mut count = 0usize;
    walk_no_input(expr, |node| {
        node.schedule_children(());
        count += 1;
    });
    count
}

/// Names of every variable occurring in `expr`, sorted and deduplicated.
pub fn variables(expr: &Expression) -> BTreeSet<&str> {
    let mut names = BTreeSet::new();
    walk_no_input(expr, |node| {
        if let Expression::Variable(leaf) = node.expr() {
            names.insert(leaf.name());
        }
        node.schedule_children(());
    });
    names
}

/// Number of nodes on the longest root-to-leaf path.
pub fn depth(expr: &Expression) -> usize {
    let mut deepest = 0usize;
    walk(expr, 1usize, |level, node| {
        deepest = deepest.max(level);
        node.schedule_children(level + 1);
    });
    deepest
}
