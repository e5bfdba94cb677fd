use strum::{EnumCount, EnumIs, EnumIter, IntoStaticStr};

/// Discriminant of every node kind in the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumIs, EnumCount, IntoStaticStr)]
pub enum ExprType {
    // Leaf expr
    Constant,
    Variable,

    // Unary expr
    Identity,
    Negation,

    // Binary expr
    And,
    Or,
    Xor,
    Equivalence,
    Implication,
}

impl ExprType {
    /// Number of children a node of this kind owns.
    pub fn arity(self) -> usize {
        match self {
            ExprType::Constant | ExprType::Variable => 0,
            ExprType::Identity | ExprType::Negation => 1,
            ExprType::And
            | ExprType::Or
            | ExprType::Xor
            | ExprType::Equivalence
            | ExprType::Implication => 2,
        }
    }
}

/// Operators with a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum UnaryOp {
    Identity,
    Negation,
}

impl UnaryOp {
    #[inline]
    pub fn apply(self, value: bool) -> bool {
        match self {
            UnaryOp::Identity => value,
            UnaryOp::Negation => !value,
        }
    }

    /// Symbol used by the textual and graph renderers.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Identity => "()",
            UnaryOp::Negation => "!",
        }
    }

    pub fn type_(self) -> ExprType {
        match self {
            UnaryOp::Identity => ExprType::Identity,
            UnaryOp::Negation => ExprType::Negation,
        }
    }
}

/// Operators with two operands.
///
/// Each operator provides two tables: [`combine`](Self::combine), the exhaustive rule applied
/// once both operands are known, and [`short_circuit`](Self::short_circuit), the result implied
/// by the left operand alone when the operator has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Equivalence,
    Implication,
}

impl BinaryOp {
    #[inline]
    pub fn combine(self, lhs: bool, rhs: bool) -> bool {
        match self {
            BinaryOp::And => lhs & rhs,
            BinaryOp::Or => lhs | rhs,
            BinaryOp::Xor => lhs ^ rhs,
            BinaryOp::Equivalence => lhs == rhs,
            BinaryOp::Implication => !lhs | rhs,
        }
    }

    /// Result determined by `lhs` alone, if any.
    ///
    /// `Xor` and `Equivalence` always need both operands and return `None`.
    #[inline]
    pub fn short_circuit(self, lhs: bool) -> Option<bool> {
        match (self, lhs) {
            (BinaryOp::And, false) => Some(false),
            (BinaryOp::Or, true) => Some(true),
            (BinaryOp::Implication, false) => Some(true),
            _ => None,
        }
    }

    /// Symbol used by the textual and graph renderers.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Xor => "^",
            BinaryOp::Equivalence => "<->",
            BinaryOp::Implication => "->",
        }
    }

    pub fn type_(self) -> ExprType {
        match self {
            BinaryOp::And => ExprType::And,
            BinaryOp::Or => ExprType::Or,
            BinaryOp::Xor => ExprType::Xor,
            BinaryOp::Equivalence => ExprType::Equivalence,
            BinaryOp::Implication => ExprType::Implication,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn short_circuit_agrees_with_combine() {
        for op in BinaryOp::iter() {
            for lhs in [false, true] {
                if let Some(value) = op.short_circuit(lhs) {
                    assert_eq!(value, op.combine(lhs, false), "{op:?} lhs={lhs}");
                    assert_eq!(value, op.combine(lhs, true), "{op:?} lhs={lhs}");
                }
            }
        }
    }

    #[test]
    fn xor_and_equivalence_never_short_circuit() {
        for lhs in [false, true] {
            assert_eq!(BinaryOp::Xor.short_circuit(lhs), None);
            assert_eq!(BinaryOp::Equivalence.short_circuit(lhs), None);
        }
    }

    #[test]
    fn arity_matches_operator_kind() {
        for op in UnaryOp::iter() {
            assert_eq!(op.type_().arity(), 1);
        }
        for op in BinaryOp::iter() {
            assert_eq!(op.type_().arity(), 2);
        }
        assert_eq!(ExprType::COUNT, UnaryOp::COUNT + BinaryOp::COUNT + 2);
    }
}
