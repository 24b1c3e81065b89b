//! Shared handle for concurrent callers.
//!
//! Every method holds the mutex for the whole operation, so the scan → mutate → flush of
//! `add_solution` never interleaves with another writer and the last writer per id wins.
//!
//! `load`, `write` and `add_solution` touch the backing store and run on tokio's blocking
//! pool; the runtime's worker threads never wait on file I/O. Lookups stay in memory and run
//! inline.

use std::sync::Arc;

use qa_core::Problem;
use tokio::sync::Mutex;
use tracing::error;

use crate::cache::SolutionCache;
use crate::error::{CacheError, Result};

#[derive(Debug, Clone)]
pub struct SharedSolutionCache {
    inner: Arc<Mutex<SolutionCache>>,
}

impl SharedSolutionCache {
    pub fn new(cache: SolutionCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub async fn load(&self) -> Result<()> {
        self.with_store_access(|cache| cache.load()).await
    }

    pub async fn write(&self) -> Result<()> {
        self.with_store_access(|cache| cache.write()).await
    }

    pub async fn add_solution(&self, problem: Problem) -> Result<()> {
        self.with_store_access(move |cache| cache.add_solution(problem))
            .await
    }

    pub async fn get_solution(&self, problem: Problem) -> Result<Problem> {
        self.inner.lock().await.get_solution(problem)
    }

    /// Snapshot of the stored problems.
    pub async fn problems(&self) -> Vec<Problem> {
        self.inner.lock().await.problems().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Runs `op` under the lock on the blocking pool. A panic inside `op` is re-raised on
    /// the caller.
    async fn with_store_access<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut SolutionCache) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let task = tokio::task::spawn_blocking(move || op(&mut inner.blocking_lock()));
        match task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                error!(error = %e, "Cache task did not complete");
                Err(CacheError::Interrupted(e.to_string()))
            }
        }
    }
}

impl From<SolutionCache> for SharedSolutionCache {
    fn from(cache: SolutionCache) -> Self {
        Self::new(cache)
    }
}
