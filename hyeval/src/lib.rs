//! Hyeval: immutable boolean expression trees and three ways to evaluate them.
//!
//! The crate exposes one small expression language (constants, variables, identity,
//! negation, and, or, xor, equivalence and implication) and evaluates it under three
//! strategies that must agree on every tree where all variables are bound:
//!  - short-circuit evaluation, which skips the right operand once the left one decides
//!    the result (`&&`, `||` and `->` only);
//!  - exhaustive evaluation, which always visits both operands;
//!  - parallel evaluation, which forks the right operand onto a scoped thread whenever
//!    the combined size of both children reaches a node-count threshold.
//!
//! Errors
//!  - The only evaluation failure is an unbound variable. It carries the variable name
//!    and travels unchanged up to the caller, including across forked threads.
//!
//! Example
//! ```
//! use hyeval::prelude::*;
//!
//! let expr = equiv(or(constant(true), constant(false)), constant(true));
//! assert_eq!(expr.to_string(), "((T || F) <-> T)");
//!
//! let counter = ForkCounter::new();
//! assert_eq!(expr.evaluate_short(None), Ok(true));
//! assert_eq!(expr.evaluate_complete(None), Ok(true));
//! assert_eq!(expr.evaluate_parallel(None, 2, &counter), Ok(true));
//! assert_eq!(counter.get(), 2);
//! ```

/// Evaluation settings loadable from TOML.
pub mod config;
/// Variable bindings consulted by `Variable` nodes.
pub mod context;
/// Process-wide and per-run fork instrumentation.
pub mod counter;
/// Error types shared by construction, evaluation and configuration.
pub mod error;
/// Evaluation strategies, the forked task runner and the evaluator facade.
pub mod eval;
/// Expression nodes, operator tables, builders and renderers.
pub mod expr;
/// Random trees and contexts for tests, benchmarks and demos.
#[cfg(any(test, feature = "test-utils"))]
pub mod tests_utils;
/// Tree walker for iterative traversals.
pub mod walker;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - `Expression` and its operator tables
    //! - Free-function builders from `func::*`
    //! - Pretty-printing via `PrettyExpr`
    //! - Evaluation entry points and their support types
    pub use crate::expr::{
        BinaryNode, Expression, UnaryNode, VariableNode, func::*, pretty::PrettyExpr,
        variant::BinaryOp, variant::ExprType, variant::UnaryOp,
    };

    pub use crate::config::EvalConfig;
    pub use crate::context::Context;
    pub use crate::counter::ForkCounter;
    pub use crate::error::{BuildError, EvalError, EvalResult};
    pub use crate::eval::{Evaluator, Strategy, task::EvaluationTask, task::TaskOutcome};

    // Walker ergonomics
    pub use crate::walker::{WalkerHandle, WalkerNodeHandle, walk, walk_no_input};
}
