//! Internal primitives powering the public walker API.
//!
//! These types are kept in a separate module to avoid exposing scheduling internals in the
//! public surface. They provide the minimal handles used by the public
//! [`WalkerHandle`](super::handle::WalkerHandle) and
//! [`WalkerNodeHandle`](super::handle::WalkerNodeHandle) wrappers.
use std::{cell::RefCell, collections::VecDeque};

use crate::expr::Expression;

/// Internal stack type: triples of (node, parent, input).
pub(super) type WalkerStackType<'e, I> = VecDeque<(&'e Expression, Option<&'e Expression>, I)>;

/// Handle for scheduling a child visit from within a visitor.
pub(super) struct InternalWalkerNodeHandle<'a, 'e, I> {
    pub(super) stack: &'a RefCell<WalkerStackType<'e, I>>,
    pub(super) children_node: &'e Expression,
    pub(super) current_node: &'e Expression,
}

impl<'a, 'e, I> InternalWalkerNodeHandle<'a, 'e, I> {
    /// Schedule the child to be visited immediately (LIFO/DFS).
    #[inline]
    pub fn schedule_immediate(&self, input: I) {
        self.stack
            .borrow_mut()
            .push_front((self.children_node, Some(self.current_node), input));
    }

    /// Schedule the child to be visited later (FIFO/BFS).
    #[inline]
    pub fn schedule_deferred(&self, input: I) {
        self.stack
            .borrow_mut()
            .push_back((self.children_node, Some(self.current_node), input));
    }

    /// Drop every pending visit. Nodes scheduled after this call are still visited.
    #[inline]
    pub fn break_(&self) {
        self.stack.borrow_mut().clear();
    }
}

/// Handle for querying or re-scheduling the current node.
pub(super) struct InternalWalkerHandle<'a, 'e, I> {
    pub(super) stack: &'a RefCell<WalkerStackType<'e, I>>,
    pub(super) parent: Option<&'e Expression>,
    pub(super) current_node: &'e Expression,
}

impl<'a, 'e, I> InternalWalkerHandle<'a, 'e, I> {
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Re-schedule the current node for an immediate re-visit, keeping its parent.
    pub fn schedule_self_immediate(&self, input: I) {
        self.stack
            .borrow_mut()
            .push_front((self.current_node, self.parent, input));
    }
}
