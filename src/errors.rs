use thiserror::Error;

/// Error type shared by storage, settings, and advisor code.
///
/// The insight functions themselves are infallible; malformed input is coerced
/// during normalization instead of surfacing here.
#[derive(Debug, Error)]
pub enum BuddyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("Advisor error: {0}")]
    Advisor(String),
}

pub type Result<T> = std::result::Result<T, BuddyError>;
