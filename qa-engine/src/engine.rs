//! Engine trait and the built-in engines: answers from the solution cache and from problem
//! defaults.

use async_trait::async_trait;
use qa_cache::{CacheError, SharedSolutionCache};
use qa_core::Problem;
use tracing::{debug, info};

use crate::error::Result;

/// A source of answers. An engine that cannot answer returns the problem unchanged
/// (unresolved); errors are reserved for engine failures.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Prepares the engine (load files, open prompts). Default: nothing to do.
    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn fetch_answer(&self, problem: Problem) -> Result<Problem>;

    /// True when answers come out of the solution cache, so recording them again is a no-op.
    fn answers_from_cache(&self) -> bool {
        false
    }
}

/// Answers from a [`SharedSolutionCache`]. `start` loads the cache file; a missing file is a
/// first run, not an error.
#[derive(Debug, Clone)]
pub struct CacheEngine {
    cache: SharedSolutionCache,
}

impl CacheEngine {
    pub fn new(cache: SharedSolutionCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &SharedSolutionCache {
        &self.cache
    }
}

#[async_trait]
impl Engine for CacheEngine {
    async fn start(&self) -> Result<()> {
        match self.cache.load().await {
            Ok(()) => Ok(()),
            Err(e) if e.is_missing_file() => {
                info!("No cache file yet, starting with an empty cache");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_answer(&self, problem: Problem) -> Result<Problem> {
        match self.cache.get_solution(problem).await {
            Ok(problem) => Ok(problem),
            Err(CacheError::NotFound { problem }) => {
                debug!(id = %problem.id, "Not in cache");
                Ok(*problem)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn answers_from_cache(&self) -> bool {
        true
    }
}

/// Answers with the problem's default when it is a valid answer for the form.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEngine;

#[async_trait]
impl Engine for DefaultEngine {
    async fn fetch_answer(&self, mut problem: Problem) -> Result<Problem> {
        if let Some(default) = problem.default.clone() {
            match problem.set_answer(default) {
                Ok(()) => debug!(id = %problem.id, "Answered with default"),
                Err(e) => debug!(id = %problem.id, error = %e, "Default is not a valid answer"),
            }
        }
        Ok(problem)
    }
}
