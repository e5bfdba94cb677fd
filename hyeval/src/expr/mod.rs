//! Immutable expression trees.
//!
//! Role
//! - [`Expression`] is a closed sum over the nine node kinds of the language.
//! - Builders in [`func`] (and the `!`, `&`, `|`, `^` operators) assemble trees bottom-up,
//!   so every node exclusively owns its children and the tree can never contain a cycle.
//! - Every node caches the size of its subtree at construction; that size drives the fork
//!   decision of parallel evaluation.
//!
//! Depth
//! - Evaluation, [`Display`](fmt::Display), `Drop` and the [`walker`](crate::walker) use
//!   explicit stacks and accept trees of any depth.
//! - The derived `Clone`, `PartialEq`, `Hash` and `Debug`, [`to_graphviz`](Expression::to_graphviz)
//!   and the pretty-printer recurse once per level and are bounded by the thread stack.
//!
//! Example
//! ```
//! use hyeval::expr::func::*;
//! use hyeval::expr::variant::ExprType;
//!
//! let e = implies(variable("a").unwrap(), !constant(false));
//! assert_eq!(e.type_(), ExprType::Implication);
//! assert_eq!(e.node_count(), 4);
//! assert_eq!(e.to_string(), "(a -> (!F))");
//! ```
pub mod func;
pub mod graphviz;
pub mod pretty;
pub mod variant;

use std::fmt;

use crate::context::is_valid_identifier;
use crate::error::BuildError;
use crate::expr::variant::{BinaryOp, ExprType, UnaryOp};

/// A node of a boolean expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    /// Literal `true` or `false`.
    Constant(bool),
    /// Named variable resolved through a [`Context`](crate::context::Context).
    Variable(VariableNode),
    Unary(UnaryNode),
    Binary(BinaryNode),
}

/// Variable leaf. Only [`Expression::variable`] builds one, so the name is always a valid
/// identifier.
///
/// ```compile_fail
/// use hyeval::expr::{Expression, VariableNode};
///
/// let e = Expression::Variable(VariableNode { name: "not valid 1".into() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableNode {
    name: String,
}

impl VariableNode {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Identity or negation of a single operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnaryNode {
    op: UnaryOp,
    count: usize,
    operand: Box<Expression>,
}

impl UnaryNode {
    #[inline]
    pub fn op(&self) -> UnaryOp {
        self.op
    }

    #[inline]
    pub fn operand(&self) -> &Expression {
        &self.operand
    }
}

/// Binary connective over two owned operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryNode {
    op: BinaryOp,
    count: usize,
    lhs: Box<Expression>,
    rhs: Box<Expression>,
}

impl BinaryNode {
    #[inline]
    pub fn op(&self) -> BinaryOp {
        self.op
    }

    #[inline]
    pub fn lhs(&self) -> &Expression {
        &self.lhs
    }

    #[inline]
    pub fn rhs(&self) -> &Expression {
        &self.rhs
    }
}

impl Expression {
    /// Build a variable node, rejecting names that are not `^[A-Za-z]+$`.
    pub fn variable(name: impl Into<String>) -> Result<Self, BuildError> {
        let name = name.into();
        if !is_valid_identifier(&name) {
            return Err(BuildError::InvalidIdentifier(name));
        }
        Ok(Expression::Variable(VariableNode { name }))
    }

    /// Variable leaf that skips name validation, for exercising precondition checks.
    #[cfg(test)]
    pub(crate) fn variable_unchecked(name: &str) -> Self {
        Expression::Variable(VariableNode {
            name: name.to_string(),
        })
    }

    /// Wrap `operand` into a unary node.
    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary(UnaryNode {
            op,
            count: operand.node_count() + 1,
            operand: Box::new(operand),
        })
    }

    /// Combine `lhs` and `rhs` into a binary node.
    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary(BinaryNode {
            op,
            count: lhs.node_count() + rhs.node_count() + 1,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// Number of nodes in the subtree rooted here, this node included.
    ///
    /// Fixed at construction, O(1).
    #[inline]
    pub fn node_count(&self) -> usize {
        match self {
            Expression::Constant(_) | Expression::Variable(_) => 1,
            Expression::Unary(node) => node.count,
            Expression::Binary(node) => node.count,
        }
    }

    /// Return the discriminant identifying the kind of this node.
    #[inline]
    pub fn type_(&self) -> ExprType {
        match self {
            Expression::Constant(_) => ExprType::Constant,
            Expression::Variable(_) => ExprType::Variable,
            Expression::Unary(node) => node.op.type_(),
            Expression::Binary(node) => node.op.type_(),
        }
    }

    /// Same as [`Expression::type_`]
    #[inline]
    pub fn r#type(&self) -> ExprType {
        self.type_()
    }

    /// Direct children, left to right.
    pub fn children(&self) -> impl Iterator<Item = &Expression> {
        let (first, second) = match self {
            Expression::Constant(_) | Expression::Variable(_) => (None, None),
            Expression::Unary(node) => (Some(node.operand()), None),
            Expression::Binary(node) => (Some(node.lhs()), Some(node.rhs())),
        };
        first.into_iter().chain(second)
    }
}

enum Piece<'e> {
    Node(&'e Expression),
    Op(BinaryOp),
    Close,
}

/// Fully parenthesised infix rendering: `T`, `F`, `name`, `(x)`, `(!x)`, `(l op r)`.
///
/// Rendering runs on an explicit stack and handles trees of any depth.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = vec![Piece::Node(self)];
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Node(Expression::Constant(true)) => f.write_str("T")?,
                Piece::Node(Expression::Constant(false)) => f.write_str("F")?,
                Piece::Node(Expression::Variable(leaf)) => f.write_str(leaf.name())?,
                Piece::Node(Expression::Unary(node)) => {
                    f.write_str(match node.op {
                        UnaryOp::Identity => "(",
                        UnaryOp::Negation => "(!",
                    })?;
                    pieces.push(Piece::Close);
                    pieces.push(Piece::Node(node.operand()));
                }
                Piece::Node(Expression::Binary(node)) => {
                    f.write_str("(")?;
                    pieces.push(Piece::Close);
                    pieces.push(Piece::Node(node.rhs()));
                    pieces.push(Piece::Op(node.op));
                    pieces.push(Piece::Node(node.lhs()));
                }
                Piece::Op(op) => write!(f, " {} ", op.symbol())?,
                Piece::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

/// Children are detached onto a heap stack before being dropped, so dropping a deep tree
/// never recurses.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut child) = pending.pop() {
            detach_children(&mut child, &mut pending);
        }
    }
}

fn detach_children(expr: &mut Expression, out: &mut Vec<Expression>) {
    let placeholder = || Expression::Constant(false);
    match expr {
        Expression::Constant(_) | Expression::Variable(_) => {}
        Expression::Unary(node) => out.push(std::mem::replace(&mut *node.operand, placeholder())),
        Expression::Binary(node) => {
            out.push(std::mem::replace(&mut *node.lhs, placeholder()));
            out.push(std::mem::replace(&mut *node.rhs, placeholder()));
        }
    }
}
