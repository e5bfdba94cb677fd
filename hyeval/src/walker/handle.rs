use std::{cell::RefCell, ops::Deref};

use crate::{
    expr::Expression,
    walker::internal::{InternalWalkerHandle, InternalWalkerNodeHandle, WalkerStackType},
};

/// Lightweight handle passed to the visitor, representing a child node plus scheduling control.
///
/// Deref this handle to access the child expression, or call
/// [`schedule_visit`](Self::schedule_visit) to enqueue it for a DFS visit with an input of
/// your choice.
pub struct WalkerNodeHandle<'a, 'e, I> {
    internal: InternalWalkerNodeHandle<'a, 'e, I>,
}

impl<'a, 'e, I> WalkerNodeHandle<'a, 'e, I> {
    /// Schedule this child to be visited immediately (LIFO), i.e., depth-first.
    #[inline]
    pub fn schedule_immediate(&self, input: I) {
        self.internal.schedule_immediate(input);
    }

    /// Schedule this child to be visited later (FIFO), i.e., breadth-first.
    #[inline]
    pub fn schedule_deferred(&self, input: I) {
        self.internal.schedule_deferred(input);
    }

    /// Shorthand for [`schedule_immediate`](Self::schedule_immediate).
    #[inline]
    pub fn schedule_visit(&self, input: I) {
        self.schedule_immediate(input)
    }

    /// Stop the traversal: every pending visit is dropped. Nodes scheduled after this call
    /// are still visited.
    #[inline]
    pub fn break_(&self) {
        self.internal.break_();
    }

    #[inline]
    pub fn r#break(&self) {
        self.break_();
    }

    /// The child expression, with the lifetime of the walked tree.
    #[inline]
    pub fn expr(&self) -> &'e Expression {
        self.internal.children_node
    }
}

impl<'a, 'e, I> Deref for WalkerNodeHandle<'a, 'e, I> {
    type Target = Expression;

    fn deref(&self) -> &Self::Target {
        self.internal.children_node
    }
}

/// Children of the visited node, ready to be scheduled.
pub enum WalkerView<'a, 'e, I> {
    Leaf,
    Unary(WalkerNodeHandle<'a, 'e, I>),
    Binary(WalkerNodeHandle<'a, 'e, I>, WalkerNodeHandle<'a, 'e, I>),
}

/// Handle passed to the visitor, representing the current node.
///
/// Deref this handle to access the expression, or match on [`view`](Self::view) to reach
/// the children and decide which ones to schedule.
pub struct WalkerHandle<'a, 'e, I> {
    internal: InternalWalkerHandle<'a, 'e, I>,
    view: WalkerView<'a, 'e, I>,
}

impl<'a, 'e, I> WalkerHandle<'a, 'e, I> {
    #[inline]
    pub fn view(&self) -> &WalkerView<'a, 'e, I> {
        &self.view
    }

    /// The current expression, with the lifetime of the walked tree.
    #[inline]
    pub fn expr(&self) -> &'e Expression {
        self.internal.current_node
    }

    /// Re-schedule the current node to be visited immediately.
    #[inline]
    pub fn schedule_self_immediate(&self, input: I) {
        self.internal.schedule_self_immediate(input);
    }

    /// Check if this node is the root of the expression tree.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.internal.is_root()
    }

    /// Schedule every child for an immediate visit; the left child is visited first.
    pub fn schedule_children(&self, input: I)
    where
        I: Clone,
    {
        match &self.view {
            WalkerView::Leaf => {}
            WalkerView::Unary(operand) => operand.schedule_immediate(input),
            WalkerView::Binary(lhs, rhs) => {
                rhs.schedule_immediate(input.clone());
                lhs.schedule_immediate(input);
            }
        }
    }
}

impl<'a, 'e, I> Deref for WalkerHandle<'a, 'e, I> {
    type Target = Expression;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.internal.current_node
    }
}

/// Walk an expression in a DFS, user-scheduled manner.
///
/// The visitor receives the input `I` the node was scheduled with and a [`WalkerHandle`]
/// whose children can be scheduled individually. Only scheduled children are visited, so
/// partial traversals and pruning come for free. The traversal uses an explicit stack and
/// never recurses.
pub fn walk<'e, F, I>(expr: &'e Expression, input: I, mut walker: F)
where
    F: FnMut(I, WalkerHandle<'_, 'e, I>),
{
    let stack = RefCell::new(WalkerStackType::<'e, I>::new());
    stack.borrow_mut().push_front((expr, None, input));

    loop {
        // Pop with a short-lived mutable borrow to avoid overlapping borrows
        let next = {
            let mut s = stack.borrow_mut();
            s.pop_front()
        };
        let Some((current_node, parent, input)) = next else {
            break;
        };

        let child = |children_node| WalkerNodeHandle {
            internal: InternalWalkerNodeHandle {
                stack: &stack,
                children_node,
                current_node,
            },
        };
        let view = match current_node {
            Expression::Constant(_) | Expression::Variable(_) => WalkerView::Leaf,
            Expression::Unary(node) => WalkerView::Unary(child(node.operand())),
            Expression::Binary(node) => WalkerView::Binary(child(node.lhs()), child(node.rhs())),
        };

        walker(
            input,
            WalkerHandle {
                internal: InternalWalkerHandle {
                    stack: &stack,
                    parent,
                    current_node,
                },
                view,
            },
        );
    }
}

/// Convenience when no input/state needs to be threaded.
#[inline]
pub fn walk_no_input<'e, F>(expr: &'e Expression, mut walker: F)
where
    F: FnMut(WalkerHandle<'_, 'e, ()>),
{
    walk(expr, (), |(), node| walker(node));
}
