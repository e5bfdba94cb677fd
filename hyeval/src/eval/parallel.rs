//! Threshold-triggered fork/join evaluation.
//!
//! At every binary node whose two children hold at least `bound` nodes together, the right
//! child is evaluated by an [`EvaluationTask`] on a crossbeam scoped thread while the calling
//! thread evaluates the left child. The caller then joins and combines both values with the
//! operator's exhaustive rule. Below the threshold the whole subtree is evaluated
//! exhaustively on the current thread.
//!
//! The scope guarantees the forked thread is joined before this frame returns, whatever the
//! outcome of the left side. When both sides fail, the left error is reported: it is known
//! before the join happens. A panic on a forked thread resumes on the joining thread.
use log::{trace, warn};

use crate::config::DEFAULT_FORK_STACK_SIZE;
use crate::context::Context;
use crate::counter::ForkCounter;
use crate::error::EvalResult;
use crate::eval::task::EvaluationTask;
use crate::eval::{ForkSettings, Mode, evaluate_in};
use crate::expr::{BinaryNode, Expression};

impl Expression {
    /// Evaluate, forking the right operand of every binary node whose children hold at least
    /// `bound` nodes together. Each spawned thread increments `counter` once.
    ///
    /// Returns the same value as [`evaluate_complete`](Self::evaluate_complete). Forked
    /// threads get [`DEFAULT_FORK_STACK_SIZE`] bytes of stack.
    pub fn evaluate_parallel(
        &self,
        ctx: Option<&Context>,
        bound: usize,
        counter: &ForkCounter,
    ) -> EvalResult<bool> {
        self.evaluate_parallel_with_stack(ctx, bound, DEFAULT_FORK_STACK_SIZE, counter)
    }

    /// Same as [`evaluate_parallel`](Self::evaluate_parallel), with `stack_size` bytes of stack
    /// for every forked thread.
    pub fn evaluate_parallel_with_stack(
        &self,
        ctx: Option<&Context>,
        bound: usize,
        stack_size: usize,
        counter: &ForkCounter,
    ) -> EvalResult<bool> {
        let fork = ForkSettings {
            bound,
            stack_size,
            counter,
        };
        evaluate_in(self, ctx, Mode::Parallel(fork))
    }
}

pub(crate) fn fork_join(
    node: &BinaryNode,
    ctx: Option<&Context>,
    fork: ForkSettings<'_>,
) -> EvalResult<bool> {
    let ForkSettings {
        bound,
        stack_size,
        counter,
    } = fork;

    crossbeam::thread::scope(|s| -> EvalResult<bool> {
        let spawned = s.builder().stack_size(stack_size).spawn(move |_| {
            let mut task =
                EvaluationTask::new(node.rhs(), ctx, bound, counter).with_stack_size(stack_size);
            task.run();
            task
        });
        let handle = match spawned {
            Ok(handle) => handle,
            Err(err) => {
                warn!(
                    "could not fork {} nodes of a {:?} node ({err}), evaluating in place",
                    node.rhs().node_count(),
                    node.op()
                );
                let lhs = evaluate_in(node.lhs(), ctx, Mode::Parallel(fork))?;
                let rhs = evaluate_in(node.rhs(), ctx, Mode::Parallel(fork))?;
                return Ok(node.op().combine(lhs, rhs));
            }
        };
        let forked = counter.increment() + 1;
        trace!(
            "fork #{forked}: {:?} node, {} nodes forked to the right",
            node.op(),
            node.rhs().node_count()
        );

        let lhs = evaluate_in(node.lhs(), ctx, Mode::Parallel(fork));
        let task = handle
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        trace!("join #{forked}: {:?}", task.outcome());

        let rhs = task
            .into_result()
            .unwrap_or_else(|| unreachable!("joined evaluation task has run"));
        Ok(node.op().combine(lhs?, rhs?))
    })
    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::func::*;

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid identifier")]
    fn forked_panic_resumes_on_joining_thread() {
        // Context lookups assert their precondition; an unchecked name trips it on the fork.
        let ctx = Context::new();
        let counter = ForkCounter::new();
        let e = and(constant(true), Expression::variable_unchecked("not valid 1"));
        let _ = e.evaluate_parallel(Some(&ctx), 0, &counter);
    }

    #[test]
    fn small_stacks_still_evaluate_long_chains() {
        let mut chain = constant(true);
        for _ in 0..50_000 {
            chain = not(chain);
        }
        let e = and(constant(true), chain);
        let counter = ForkCounter::new();
        assert_eq!(
            e.evaluate_parallel_with_stack(None, 0, 64 * 1024, &counter),
            Ok(true)
        );
        assert_eq!(counter.get(), 1);
    }
}
