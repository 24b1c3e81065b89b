use thiserror::Error;

/// Errors raised by problem answers and artifact configs.
#[derive(Error, Debug)]
pub enum QaError {
    #[error("Problem {0} is not resolved")]
    Unresolved(String),

    #[error("Answer of problem {id} is not a {expected}")]
    AnswerType { id: String, expected: &'static str },

    #[error("Invalid answer for problem {id}: {reason}")]
    InvalidAnswer { id: String, reason: String },

    #[error("Config {0} not found in artifact")]
    ConfigNotFound(String),

    #[error("Unable to decode config {name}: {source}")]
    ConfigDecode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, QaError>;
