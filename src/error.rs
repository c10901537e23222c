pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Client input errors
    #[error("{0}")]
    ValidationError(String),
    // The targeted subscription id has no stored row
    #[error("Record not found")]
    RecordNotFound,
    // Database errors
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
    // Response encoding errors
    #[error("Failed to serialize response: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
