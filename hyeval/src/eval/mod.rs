//! Evaluation strategies.
//!
//! All three strategies traverse depth-first, left to right, and share one error semantic:
//! the first unbound variable met on that path aborts the whole evaluation and is returned
//! unchanged. They differ only in which operands they visit.
//!
//! Traversal uses an explicit stack, so tree depth is bounded by memory, not by the thread
//! stack. Parallel evaluation nests one native frame per fork only.
//!
//! | Strategy | Binary node policy |
//! |---|---|
//! | [`evaluate_short`](Expression::evaluate_short) | skip the right operand when the left one decides (`&&`, `\|\|`, `->`) |
//! | [`evaluate_complete`](Expression::evaluate_complete) | always evaluate both operands |
//! | [`evaluate_parallel`](Expression::evaluate_parallel) | fork the right operand above a node-count threshold, else exhaustive |
pub mod parallel;
pub mod task;

use log::debug;
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::config::EvalConfig;
use crate::context::Context;
use crate::counter::ForkCounter;
use crate::error::{EvalError, EvalResult};
use crate::expr::variant::{BinaryOp, UnaryOp};
use crate::expr::{BinaryNode, Expression};

fn lookup(name: &str, ctx: Option<&Context>) -> EvalResult<bool> {
    ctx.and_then(|ctx| ctx.get(name))
        .ok_or_else(|| EvalError::UnboundVariable {
            name: name.to_string(),
        })
}

/// Fork parameters threaded through parallel evaluation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ForkSettings<'a> {
    pub bound: usize,
    pub stack_size: usize,
    pub counter: &'a ForkCounter,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Mode<'a> {
    Short,
    Complete,
    Parallel(ForkSettings<'a>),
}

enum Step<'e> {
    Visit(&'e Expression),
    Apply(UnaryOp),
    Decide(&'e BinaryNode),
    Combine(BinaryOp, bool),
}

/// Depth-first, left-to-right evaluation on an explicit stack.
///
/// `value` always holds the result of the subtree visited last; every step pushed below a
/// `Visit` consumes it. In parallel mode only forks recurse, through
/// [`fork_join`](parallel::fork_join).
pub(crate) fn evaluate_in(
    expr: &Expression,
    ctx: Option<&Context>,
    mode: Mode<'_>,
) -> EvalResult<bool> {
    let mut steps = vec![Step::Visit(expr)];
    let mut value = false;

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(Expression::Constant(constant)) => value = *constant,
            Step::Visit(Expression::Variable(leaf)) => value = lookup(leaf.name(), ctx)?,
            Step::Visit(Expression::Unary(node)) => {
                steps.push(Step::Apply(node.op()));
                steps.push(Step::Visit(node.operand()));
            }
            Step::Visit(Expression::Binary(node)) => match mode {
                Mode::Parallel(fork)
                    if node.lhs().node_count() + node.rhs().node_count() >= fork.bound =>
                {
                    value = parallel::fork_join(node, ctx, fork)?;
                }
                _ => {
                    steps.push(Step::Decide(node));
                    steps.push(Step::Visit(node.lhs()));
                }
            },
            Step::Apply(op) => value = op.apply(value),
            Step::Decide(node) => {
                let decided = match mode {
                    Mode::Short => node.op().short_circuit(value),
                    _ => None,
                };
                match decided {
                    Some(result) => value = result,
                    None => {
                        steps.push(Step::Combine(node.op(), value));
                        steps.push(Step::Visit(node.rhs()));
                    }
                }
            }
            Step::Combine(op, lhs) => value = op.combine(lhs, value),
        }
    }
    Ok(value)
}

impl Expression {
    /// Evaluate with short-circuiting `&&`, `||` and `->`.
    ///
    /// The right operand of those operators is only evaluated when the left operand does not
    /// already decide the result, so an unbound variable there goes unnoticed.
    pub fn evaluate_short(&self, ctx: Option<&Context>) -> EvalResult<bool> {
        evaluate_in(self, ctx, Mode::Short)
    }

    /// Evaluate every operand of every node.
    pub fn evaluate_complete(&self, ctx: Option<&Context>) -> EvalResult<bool> {
        evaluate_in(self, ctx, Mode::Complete)
    }

    /// Evaluate with the given strategy.
    pub fn evaluate(
        &self,
        strategy: Strategy,
        ctx: Option<&Context>,
        bound: usize,
        counter: &ForkCounter,
    ) -> EvalResult<bool> {
        match strategy {
            Strategy::Short => self.evaluate_short(ctx),
            Strategy::Complete => self.evaluate_complete(ctx),
            Strategy::Parallel => self.evaluate_parallel(ctx, bound, counter),
        }
    }
}

/// Selects one of the three evaluation semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
    Short,
    Complete,
    #[default]
    Parallel,
}

/// Evaluates expressions according to an [`EvalConfig`] and keeps its own fork counter.
#[derive(Debug, Default)]
pub struct Evaluator {
    config: EvalConfig,
    counter: ForkCounter,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self {
            config,
            counter: ForkCounter::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Forks performed by every evaluation since creation or the last [`reset`](Self::reset).
    #[inline]
    pub fn forks(&self) -> usize {
        self.counter.get()
    }

    pub fn reset(&self) {
        self.counter.reset();
    }

    /// Evaluate with the configured strategy and bound.
    pub fn evaluate(&self, expr: &Expression, ctx: Option<&Context>) -> EvalResult<bool> {
        self.evaluate_with(self.config.strategy, expr, ctx)
    }

    /// Evaluate with an explicit strategy and the configured bound and fork stack size.
    pub fn evaluate_with(
        &self,
        strategy: Strategy,
        expr: &Expression,
        ctx: Option<&Context>,
    ) -> EvalResult<bool> {
        let before = self.counter.get();
        let result = match strategy {
            Strategy::Parallel => expr.evaluate_parallel_with_stack(
                ctx,
                self.config.bound,
                self.config.stack_size,
                &self.counter,
            ),
            _ => expr.evaluate(strategy, ctx, self.config.bound, &self.counter),
        };
        debug!(
            "{strategy} evaluation of {} nodes (bound {}): {:?}, {} forks",
            expr.node_count(),
            self.config.bound,
            result,
            self.counter.get().saturating_sub(before)
        );
        result
    }
}
