#[derive(Debug, thiserror::Error)]
pub enum BinderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Not owned: {0}")]
    NotOwned(String),

    #[error("Count underflow: {0}")]
    Underflow(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, BinderError>;
