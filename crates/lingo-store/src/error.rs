use lingo_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Local(#[from] CoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("An account with this email already exists")]
    EmailExists,

    #[error("Email or password is incorrect")]
    InvalidCredentials,

    #[error("Password is too weak: {0}")]
    WeakPassword(String),

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Too many attempts, try again later")]
    TooManyAttempts,

    #[error("Email/password sign-in is not enabled for this project")]
    ProviderDisabled,

    #[error("Auth request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
