//! Free-function builders, the node factory of the crate.
//!
//! Every builder takes already-built subtrees by value, so construction is strictly
//! bottom-up and each child ends up with exactly one owner.
use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::error::BuildError;
use crate::expr::Expression;
use crate::expr::variant::{BinaryOp, UnaryOp};

#[inline]
pub fn constant(value: bool) -> Expression {
    Expression::Constant(value)
}

/// Build a variable node; see [`Expression::variable`].
#[inline]
pub fn variable(name: impl Into<String>) -> Result<Expression, BuildError> {
    Expression::variable(name)
}

#[inline]
pub fn identity(operand: Expression) -> Expression {
    Expression::unary(UnaryOp::Identity, operand)
}

#[inline]
pub fn not(operand: Expression) -> Expression {
    Expression::unary(UnaryOp::Negation, operand)
}

#[inline]
pub fn and(lhs: Expression, rhs: Expression) -> Expression {
    Expression::binary(BinaryOp::And, lhs, rhs)
}

#[inline]
pub fn or(lhs: Expression, rhs: Expression) -> Expression {
    Expression::binary(BinaryOp::Or, lhs, rhs)
}

#[inline]
pub fn xor(lhs: Expression, rhs: Expression) -> Expression {
    Expression::binary(BinaryOp::Xor, lhs, rhs)
}

#[inline]
pub fn equiv(lhs: Expression, rhs: Expression) -> Expression {
    Expression::binary(BinaryOp::Equivalence, lhs, rhs)
}

#[inline]
pub fn implies(lhs: Expression, rhs: Expression) -> Expression {
    Expression::binary(BinaryOp::Implication, lhs, rhs)
}

impl Not for Expression {
    type Output = Expression;

    fn not(self) -> Self::Output {
        not(self)
    }
}

impl BitAnd for Expression {
    type Output = Expression;

    fn bitand(self, rhs: Self) -> Self::Output {
        and(self, rhs)
    }
}

impl BitOr for Expression {
    type Output = Expression;

    fn bitor(self, rhs: Self) -> Self::Output {
        or(self, rhs)
    }
}

impl BitXor for Expression {
    type Output = Expression;

    fn bitxor(self, rhs: Self) -> Self::Output {
        xor(self, rhs)
    }
}
