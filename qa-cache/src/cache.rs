//! # Solution Cache
//!
//! [`SolutionCache`] keeps answered problems in insertion order and persists them through a
//! [`DocumentStore`] bound at construction.
//!
//! ## Operations
//!
//! - `load` – read the bound document and merge it in (first loaded wins on conflict)
//! - `write` – flush the whole cache to the backend
//! - `add_solution` – insert or overwrite by id, then flush (write-through)
//! - `get_solution` – answer a posed problem from the cache by id or by matching
//!
//! ## Asymmetry
//!
//! `add_solution` overwrites a record with the same id in place. Merging a loaded document
//! never overwrites: a loaded problem that matches an existing record is dropped with a warning.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use qa_core::{DefaultMatcher, ObjectMeta, Problem, ProblemMatcher};
use storage::{DocumentStore, FileStore, StorageError};
use tracing::{debug, error, info, instrument, warn};

use crate::config::CacheConfig;
use crate::document::CacheDocument;
use crate::error::{CacheError, Result};

pub struct SolutionCache {
    path: PathBuf,
    persist_passwords: bool,
    metadata: ObjectMeta,
    problems: Vec<Problem>,
    store: Arc<dyn DocumentStore>,
    matcher: Arc<dyn ProblemMatcher>,
}

impl SolutionCache {
    /// Creates an empty cache bound to a file at `path`. No I/O happens here.
    pub fn new(path: impl Into<PathBuf>, persist_passwords: bool) -> Self {
        Self::with_store(path, persist_passwords, Arc::new(FileStore::new()))
    }

    /// Creates an empty cache bound to `path` in the given backend.
    pub fn with_store(
        path: impl Into<PathBuf>,
        persist_passwords: bool,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            path: path.into(),
            persist_passwords,
            metadata: ObjectMeta::default(),
            problems: Vec::new(),
            store,
            matcher: Arc::new(DefaultMatcher),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.path.clone(), config.persist_passwords)
    }

    /// Replaces the equivalence test used by `get_solution` and by merging.
    pub fn with_matcher(mut self, matcher: Arc<dyn ProblemMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_metadata(mut self, metadata: ObjectMeta) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn persist_passwords(&self) -> bool {
        self.persist_passwords
    }

    pub fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Reads the bound document and merges its solutions into this cache.
    ///
    /// On any read, decode or validation failure the in-memory problems are left untouched
    /// and the error is returned; whether a missing file is fatal is the caller's call
    /// (see [`CacheError::is_missing_file`]).
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&mut self) -> Result<()> {
        let loaded = self.read_document().map_err(|e| {
            error!(error = %e, "Unable to load the cache file");
            e
        })?;

        let mut transient =
            SolutionCache::with_store(&self.path, self.persist_passwords, self.store.clone());
        transient.metadata = loaded.metadata;
        transient.problems = loaded.spec.problems;

        if self.metadata.is_empty() {
            self.metadata = transient.metadata.clone();
        }
        let total = transient.len();
        let added = self.merge(transient);
        info!(total, added, "Cache loaded");
        Ok(())
    }

    fn read_document(&self) -> std::result::Result<CacheDocument, StorageError> {
        let value = self.store.read(&self.path)?;
        let document: CacheDocument =
            serde_json::from_value(value).map_err(|e| StorageError::parse(&self.path, e))?;
        document.validate(&self.path)?;
        Ok(document)
    }

    /// Serializes the whole cache to the bound path.
    pub fn write(&self) -> Result<()> {
        let document = CacheDocument::new(self.metadata.clone(), self.problems.clone());
        let written = serde_json::to_value(&document)
            .map_err(|e| StorageError::parse(&self.path, e))
            .and_then(|value| self.store.write(&self.path, &value));
        if let Err(e) = written {
            warn!(path = %self.path.display(), error = %e, "Unable to write cache");
            return Err(e.into());
        }
        debug!(
            path = %self.path.display(),
            solutions = self.problems.len(),
            "Cache written"
        );
        Ok(())
    }

    /// Stores a resolved problem and flushes the cache.
    ///
    /// A problem with the same id is overwritten in place; otherwise the problem is appended.
    /// If the flush fails the in-memory update is kept and the error returned, so the
    /// solution stays cached for this process only.
    #[instrument(skip(self, problem), fields(id = %problem.id))]
    pub fn add_solution(&mut self, problem: Problem) -> Result<()> {
        if problem.form.is_password() && !self.persist_passwords {
            let err = CacheError::PolicyViolation(format!(
                "password for problem {} is not added to the cache",
                problem.id
            ));
            debug!(error = %err, "Solution not cached");
            return Err(err);
        }
        if !problem.is_resolved() {
            let err = CacheError::InvalidState(format!(
                "problem {} is unresolved and will not be added to the cache",
                problem.id
            ));
            warn!(error = %err, "Solution not cached");
            return Err(err);
        }

        match self.problems.iter_mut().find(|cp| cp.id == problem.id) {
            Some(existing) => {
                debug!(desc = %problem.desc, "A solution already exists in cache, rewriting");
                *existing = problem;
            }
            None => self.problems.push(problem),
        }

        self.write().map_err(|e| {
            error!(error = %e, "Failed to write to the cache file");
            e
        })
    }

    /// Answers `problem` from the cache.
    ///
    /// The first stored solution whose id equals the problem's, or which the matcher
    /// considers equivalent, supplies the answer. A miss returns
    /// [`CacheError::NotFound`] carrying `problem` unchanged.
    pub fn get_solution(&self, mut problem: Problem) -> Result<Problem> {
        if problem.is_resolved() {
            warn!(id = %problem.id, "Problem already solved");
            return Ok(problem);
        }
        let found = self.problems.iter().find(|cp| {
            (cp.id == problem.id || self.matcher.matches(cp, &problem)) && cp.is_resolved()
        });
        match found {
            Some(cp) => {
                debug!(id = %problem.id, cached_id = %cp.id, "Solution found in cache");
                problem.answer = cp.answer.clone();
                Ok(problem)
            }
            None => Err(CacheError::NotFound {
                problem: Box::new(problem),
            }),
        }
    }

    /// Appends every problem of `other` that matches no existing record. Returns how many
    /// were appended.
    pub(crate) fn merge(&mut self, other: SolutionCache) -> usize {
        let mut added = 0;
        for p in other.problems {
            let duplicate = self.problems.iter().any(|op| self.matcher.matches(op, &p));
            if duplicate {
                warn!(
                    id = %p.id,
                    desc = %p.desc,
                    "There are two or more answers for the same problem in cache, ignoring latter ones"
                );
                continue;
            }
            self.problems.push(p);
            added += 1;
        }
        added
    }
}

impl fmt::Debug for SolutionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolutionCache")
            .field("path", &self.path)
            .field("persist_passwords", &self.persist_passwords)
            .field("metadata", &self.metadata)
            .field("problems", &self.problems)
            .finish_non_exhaustive()
    }
}
