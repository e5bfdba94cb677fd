//! Evaluation settings.
//!
//! Settings are plain TOML; every key is optional.
//!
//! ```toml
//! strategy = "parallel"   # "short", "complete" or "parallel"
//! bound = 32              # fork when both children hold at least this many nodes
//! stack_size = 8388608    # bytes of stack for every forked thread
//! ```
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::eval::Strategy;

/// Default fork threshold, in nodes.
pub const DEFAULT_FORK_BOUND: usize = 64;

/// Default stack of a forked thread, in bytes.
pub const DEFAULT_FORK_STACK_SIZE: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Strategy used by [`Evaluator::evaluate`](crate::eval::Evaluator::evaluate).
    pub strategy: Strategy,
    /// Threshold for parallel evaluation: a binary node forks when the combined node count of
    /// its children is at least this value.
    pub bound: usize,
    /// Stack size of every thread spawned by parallel evaluation.
    pub stack_size: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            bound: DEFAULT_FORK_BOUND,
            stack_size: DEFAULT_FORK_STACK_SIZE,
        }
    }
}

impl EvalConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source).map_err(|source| ConfigError::Parse {
            source,
            file: path.display().to_string(),
        })?;
        info!(
            "Loaded evaluation config from '{}': {} strategy, bound {}, {} byte fork stacks",
            path.display(),
            config.strategy,
            config.bound,
            config.stack_size
        );
        Ok(config)
    }
}
