//! Unit of work executed on a forked thread.
use crate::config::DEFAULT_FORK_STACK_SIZE;
use crate::context::Context;
use crate::counter::ForkCounter;
use crate::error::{EvalError, EvalResult};
use crate::expr::Expression;

/// State of an [`EvaluationTask`].
///
/// A legitimate `false` result and a failure are distinct variants, and both are distinct
/// from a task that has not run yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskOutcome {
    #[default]
    Pending,
    Finished(bool),
    Failed(EvalError),
}

/// Parallel evaluation of one subtree, meant to run on its own thread.
///
/// The task borrows the subtree, the context and the fork counter; the scoped thread that
/// runs it is always joined before any of those borrows end. [`result`](Self::result) and
/// [`error`](Self::error) are only meaningful once [`run`](Self::run) has returned.
#[derive(Debug)]
pub struct EvaluationTask<'a> {
    expr: &'a Expression,
    ctx: Option<&'a Context>,
    bound: usize,
    stack_size: usize,
    counter: &'a ForkCounter,
    outcome: TaskOutcome,
}

impl<'a> EvaluationTask<'a> {
    pub fn new(
        expr: &'a Expression,
        ctx: Option<&'a Context>,
        bound: usize,
        counter: &'a ForkCounter,
    ) -> Self {
        Self {
            expr,
            ctx,
            bound,
            stack_size: DEFAULT_FORK_STACK_SIZE,
            counter,
            outcome: TaskOutcome::Pending,
        }
    }

    /// Stack size given to the threads this task forks in turn.
    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }

    /// Evaluate the subtree with `evaluate_parallel` and store the outcome.
    pub fn run(&mut self) {
        let result = self.expr.evaluate_parallel_with_stack(
            self.ctx,
            self.bound,
            self.stack_size,
            self.counter,
        );
        self.outcome = match result {
            Ok(value) => TaskOutcome::Finished(value),
            Err(err) => TaskOutcome::Failed(err),
        };
    }

    #[inline]
    pub fn outcome(&self) -> &TaskOutcome {
        &self.outcome
    }

    /// Return `true` once [`run`](Self::run) has stored either a value or an error.
    #[inline]
    pub fn is_finished(&self) -> bool {
        !matches!(self.outcome, TaskOutcome::Pending)
    }

    /// Value computed by the task, `None` if it failed or has not run.
    #[inline]
    pub fn result(&self) -> Option<bool> {
        match self.outcome {
            TaskOutcome::Finished(value) => Some(value),
            _ => None,
        }
    }

    /// Error raised by the task, `None` if it succeeded or has not run.
    #[inline]
    pub fn error(&self) -> Option<&EvalError> {
        match &self.outcome {
            TaskOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Consume the task into the value or error it produced, `None` if it never ran.
    pub fn into_result(self) -> Option<EvalResult<bool>> {
        match self.outcome {
            TaskOutcome::Finished(value) => Some(Ok(value)),
            TaskOutcome::Failed(err) => Some(Err(err)),
            TaskOutcome::Pending => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::func::*;

    #[test]
    fn false_result_is_not_an_error() {
        let expr = constant(false);
        let counter = ForkCounter::new();
        let mut task = EvaluationTask::new(&expr, None, 0, &counter);
        assert!(!task.is_finished());
        assert_eq!(task.result(), None);

        task.run();
        assert!(task.is_finished());
        assert_eq!(task.result(), Some(false));
        assert_eq!(task.error(), None);
        assert_eq!(task.into_result(), Some(Ok(false)));
    }

    #[test]
    fn stores_unbound_variable() {
        let expr = not(variable("a").unwrap());
        let counter = ForkCounter::new();
        let mut task = EvaluationTask::new(&expr, None, 0, &counter);
        task.run();
        assert_eq!(task.result(), None);
        assert_eq!(task.error().map(EvalError::name), Some("a"));
        assert!(matches!(task.outcome(), TaskOutcome::Failed(_)));
    }

    #[test]
    fn pending_task_has_no_result() {
        let expr = constant(true);
        let counter = ForkCounter::new();
        let task = EvaluationTask::new(&expr, None, 0, &counter);
        assert_eq!(task.outcome(), &TaskOutcome::Pending);
        assert_eq!(task.into_result(), None);
    }

    #[test]
    fn forks_inherit_stack_size() {
        let expr = xor(constant(true), not(constant(true)));
        let counter = ForkCounter::new();
        let mut task = EvaluationTask::new(&expr, None, 0, &counter).with_stack_size(128 * 1024);
        task.run();
        assert_eq!(task.into_result(), Some(Ok(true)));
        assert_eq!(counter.get(), 1);
    }
}
