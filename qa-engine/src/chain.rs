//! # Engine chain
//!
//! Tries engines in order for each problem; the first engine that resolves it wins. The answer
//! is then recorded in the write cache so the next run can skip the question. Answers that
//! already came from the cache are not recorded again.

use std::sync::Arc;

use qa_cache::SharedSolutionCache;
use qa_core::Problem;
use tracing::{debug, info, instrument, warn};

use crate::engine::Engine;
use crate::error::{EngineError, Result};

/// Engines tried in order, plus an optional cache recording every answer.
#[derive(Clone, Default)]
pub struct EngineChain {
    engines: Vec<Arc<dyn Engine>>,
    write_cache: Option<SharedSolutionCache>,
}

impl EngineChain {
    /// Creates an empty chain (no engines, no write cache).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an engine (tried after the ones already added).
    pub fn add_engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engines.push(engine);
        self
    }

    /// Records every answer in `cache`.
    pub fn with_write_cache(mut self, cache: SharedSolutionCache) -> Self {
        self.write_cache = Some(cache);
        self
    }

    /// Starts every engine in order; stops at the first failure.
    pub async fn start(&self) -> Result<()> {
        for engine in &self.engines {
            let engine_name = std::any::type_name_of_val(engine.as_ref());
            info!(engine = %engine_name, "step: engine start");
            engine.start().await?;
        }
        Ok(())
    }

    /// Resolves `problem` with the first engine that answers it.
    ///
    /// An engine error is logged and the next engine is tried. Recording in the write cache
    /// is best-effort: a refused or failed write is logged and the answer still returned.
    /// Cache hits skip the write-back.
    #[instrument(skip(self, problem), fields(id = %problem.id))]
    pub async fn fetch_answer(&self, problem: Problem) -> Result<Problem> {
        if problem.is_resolved() {
            debug!("Problem already solved");
            return Ok(problem);
        }

        let mut current = problem;
        let mut resolved_by = None;
        for engine in &self.engines {
            let engine_name = std::any::type_name_of_val(engine.as_ref());
            debug!(engine = %engine_name, "step: engine fetching answer");
            match engine.fetch_answer(current.clone()).await {
                Ok(p) => current = p,
                Err(e) => {
                    warn!(engine = %engine_name, error = %e, "Engine failed, trying next");
                    continue;
                }
            }
            if current.is_resolved() {
                resolved_by = Some((engine_name, engine.answers_from_cache()));
                break;
            }
        }

        let Some((engine_name, from_cache)) = resolved_by else {
            return Err(EngineError::Unresolved(current.id));
        };
        info!(engine = %engine_name, from_cache, "step: problem resolved");

        if from_cache {
            return Ok(current);
        }
        if let Some(cache) = &self.write_cache {
            match cache.add_solution(current.clone()).await {
                Ok(()) => {}
                Err(e) if e.is_policy_violation() => debug!(error = %e, "Answer not cached"),
                Err(e) => warn!(error = %e, "Unable to cache answer"),
            }
        }
        Ok(current)
    }
}
