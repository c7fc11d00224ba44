use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record '{key}' of kind '{kind}' not found")]
    NotFound { kind: String, key: String },

    #[error("Record '{key}' of kind '{kind}' already exists")]
    Conflict { kind: String, key: String },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn not_found(kind: &str, key: &str) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            key: key.to_string(),
        }
    }

    pub fn conflict(kind: &str, key: &str) -> Self {
        Self::Conflict {
            kind: kind.to_string(),
            key: key.to_string(),
        }
    }

    /// True for the recoverable negative results that callers are expected
    /// to translate into domain-specific outcomes rather than failures.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Conflict { .. })
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
