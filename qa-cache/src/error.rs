//! Cache error types.
//!
//! `PolicyViolation` and `NotFound` are expected outcomes (skip caching / ask the user);
//! `InvalidState` is a caller bug; `Storage` wraps backend read/write/decode failures;
//! `Interrupted` means a background cache task was cancelled before it finished.

use qa_core::Problem;
use storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Carries the posed problem back unmodified.
    #[error("Problem {} was not found in the cache", .problem.id)]
    NotFound { problem: Box<Problem> },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Cache task interrupted: {0}")]
    Interrupted(String),
}

impl CacheError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound { .. })
    }

    pub fn is_policy_violation(&self) -> bool {
        matches!(self, CacheError::PolicyViolation(_))
    }

    /// True when the backing document does not exist yet (first run).
    pub fn is_missing_file(&self) -> bool {
        matches!(self, CacheError::Storage(e) if e.is_not_found())
    }

    /// The original problem of a `NotFound` lookup.
    pub fn into_problem(self) -> Option<Problem> {
        match self {
            CacheError::NotFound { problem } => Some(*problem),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
