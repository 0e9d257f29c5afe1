use thiserror::Error;

/// Errors surfaced by index maintenance and reads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;

impl IndexError {
    /// Whether a caller could reasonably retry the failed operation.
    pub fn is_retriable(&self) -> bool {
        matches!(self, IndexError::StorageUnavailable(_))
    }
}

impl From<sled::Error> for IndexError {
    fn from(err: sled::Error) -> Self {
        IndexError::StorageUnavailable(err.to_string())
    }
}

impl From<bincode::Error> for IndexError {
    fn from(err: bincode::Error) -> Self {
        IndexError::StorageUnavailable(format!("undecodable record: {err}"))
    }
}
