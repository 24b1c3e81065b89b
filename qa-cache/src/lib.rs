//! # QA Solution Cache
//!
//! Persists answered problems ("solutions") so that re-running the QA workflow does not ask
//! the same questions again.
//!
//! ## Flow
//!
//! 1. Build a [`SolutionCache`] bound to a path (or from [`CacheConfig`]).
//! 2. `load()` once at startup to merge what is on disk.
//! 3. `get_solution()` before prompting; [`CacheError::NotFound`] means "ask the user".
//! 4. `add_solution()` after the user answers; the cache is written through on every add.
//!
//! Use [`SharedSolutionCache`] from async code or when several problems are resolved
//! concurrently; it keeps backend I/O off the runtime workers.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use qa_cache::SolutionCache;
//! use qa_core::Problem;
//! use storage::InMemoryStore;
//!
//! let mut cache = SolutionCache::with_store("qacache.yaml", false, Arc::new(InMemoryStore::new()));
//!
//! let mut answered = Problem::input("port", "Which port?");
//! answered.set_answer("8080").unwrap();
//! cache.add_solution(answered).unwrap();
//!
//! let found = cache.get_solution(Problem::input("port", "Which port?")).unwrap();
//! assert_eq!(found.answer_as_string().unwrap(), "8080");
//! ```

mod cache;
mod config;
mod document;
mod error;
mod shared;

pub use cache::SolutionCache;
pub use config::{CacheConfig, DEFAULT_CACHE_FILE, ENV_CACHE_FILE, ENV_PERSIST_PASSWORDS};
pub use document::{CacheDocument, CacheSpec, API_GROUP, API_VERSION, QA_CACHE_KIND};
pub use error::{CacheError, Result};
pub use shared::SharedSolutionCache;
