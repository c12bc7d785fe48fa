#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Corrupt record under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    Validation(String),
}
