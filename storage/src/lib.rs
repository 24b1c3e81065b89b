//! Storage crate: document persistence behind the [`DocumentStore`] abstraction.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`store`] – DocumentStore trait
//! - [`file_store`] – FileStore (YAML / JSON files)
//! - [`memory_store`] – InMemoryStore

mod error;
mod file_store;
mod memory_store;
mod store;

pub use error::StorageError;
pub use file_store::{DocumentFormat, FileStore};
pub use memory_store::InMemoryStore;
pub use store::DocumentStore;
