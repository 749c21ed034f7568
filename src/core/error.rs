use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Paste '{0}' already exists")]
    Conflict(String),

    #[error("Paste '{0}' not found")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid paste: {0}")]
    Invalid(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PasteError>;

impl PasteError {
    /// True when the error is the normal negative result of a lookup,
    /// as opposed to a failure worth reporting.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PasteError::NotFound(_))
    }
}
