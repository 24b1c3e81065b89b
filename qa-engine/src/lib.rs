//! # qa-engine
//!
//! Resolves problems with a chain of answer engines: typically a [`CacheEngine`] first (skip
//! already-answered questions), then the interactive prompt supplied by the caller, with a
//! [`DefaultEngine`] for unattended runs. Answers are written back to the solution cache.

mod chain;
mod engine;
mod error;

pub use chain::EngineChain;
pub use engine::{CacheEngine, DefaultEngine, Engine};
pub use error::{EngineError, Result};
