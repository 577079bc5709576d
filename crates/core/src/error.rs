use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellariumError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("extension unit error: {0}")]
    Unit(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CellariumError>;
