use qa_cache::CacheError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No engine could resolve problem {0}")]
    Unresolved(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Engine error: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
