//! Fatal errors raised while recognizing input.
//!
//! A rejected input is not an error: it is a normal
//! [`Outcome::Rejected`](crate::core::Outcome) on a recognition path. The
//! variants here signal broken definitions or misused query operations and
//! abort the whole run.

use crate::query::Role;
use thiserror::Error;

/// Errors from the pattern query operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("{role} role is still free; bind it (e.g. with a prior query) before removing or adding")]
    FreeVariable { role: Role },
}

/// Errors returned by adaptive actions.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("{0}")]
    Failed(String),
}

/// Errors that abort a recognition run.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("submachine return from state '{state}' with an empty call stack")]
    EmptyCallStack { state: String },

    #[error("unknown action '{name}'")]
    UnknownAction { name: String },

    #[error("unknown submachine '{name}'")]
    UnknownSubmachine { name: String },

    #[error("action '{name}' failed: {source}")]
    Action {
        name: String,
        #[source]
        source: ActionError,
    },

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("recognition did not finish within {limit} ticks")]
    TickLimitExceeded { limit: usize },
}

impl RecognitionError {
    /// Short machine-readable code for the error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            RecognitionError::EmptyCallStack { .. } => "EMPTY_CALL_STACK",
            RecognitionError::UnknownAction { .. } => "UNKNOWN_ACTION",
            RecognitionError::UnknownSubmachine { .. } => "UNKNOWN_SUBMACHINE",
            RecognitionError::Action { .. } => "ACTION_FAILED",
            RecognitionError::Query(_) => "FREE_VARIABLE",
            RecognitionError::TickLimitExceeded { .. } => "TICK_LIMIT",
        }
    }
}
