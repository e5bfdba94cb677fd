use std::sync::atomic::{AtomicUsize, Ordering};

static GLOBAL: ForkCounter = ForkCounter::new();

/// Counts the threads spawned by parallel evaluation.
///
/// The counter is incremented exactly once per fork that actually spawns a task. It is only
/// used for observability and tests; evaluation results never depend on it. Concurrent
/// increments from nested forks are safe.
#[derive(Debug, Default)]
pub struct ForkCounter {
    forks: AtomicUsize,
}

impl ForkCounter {
    pub const fn new() -> Self {
        Self {
            forks: AtomicUsize::new(0),
        }
    }

    /// Process-wide counter shared by every caller that asks for it.
    pub fn global() -> &'static ForkCounter {
        &GLOBAL
    }

    /// Current number of forks.
    #[inline]
    pub fn get(&self) -> usize {
        self.forks.load(Ordering::Acquire)
    }

    /// Set the counter back to zero.
    #[inline]
    pub fn reset(&self) {
        self.forks.store(0, Ordering::Release);
    }

    /// Record one fork, returning the previous value.
    #[inline]
    pub fn increment(&self) -> usize {
        self.forks.fetch_add(1, Ordering::AcqRel)
    }
}
