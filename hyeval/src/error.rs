use thiserror::Error;

/// Failure raised while evaluating an expression.
///
/// There is exactly one way for evaluation to fail: a `Variable` node whose name cannot be
/// resolved, either because no context was supplied or because the context lacks the name.
/// The error is returned unchanged by every ancestor, and a forked task hands it back to the
/// thread that joins it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum EvalError {
    #[error("Variable '{name}' is not bound in the evaluation context")]
    UnboundVariable { name: String },
}

impl EvalError {
    /// Name of the variable that could not be resolved.
    pub fn name(&self) -> &str {
        match self {
            EvalError::UnboundVariable { name } => name,
        }
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Rejected input when building expression nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Invalid identifier '{0}': identifiers must be non-empty and contain only ASCII letters")]
    InvalidIdentifier(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    Parse {
        source: toml::de::Error,
        file: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
