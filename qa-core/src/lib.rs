//! # qa-core
//!
//! Core types for the question-answering workflow: [`Problem`] and its answer forms,
//! [`ProblemMatcher`] for cross-run question equivalence, document metadata, the [`Artifact`]
//! data carrier, and tracing initialization. Used by the storage, cache and engine crates.

pub mod artifact;
pub mod error;
pub mod logger;
pub mod matcher;
pub mod meta;
pub mod problem;

pub use artifact::{Artifact, LabelSelector, LabelSelectorRequirement, SelectorOperator};
pub use error::{QaError, Result};
pub use logger::init_tracing;
pub use matcher::{DefaultMatcher, ProblemMatcher};
pub use meta::{ObjectMeta, TypeMeta};
pub use problem::{Problem, SolutionFormType};
