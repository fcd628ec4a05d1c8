use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("file read failed: {0}")]
    FileRead(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
