use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Adapter error: {0}")]
    Adapter(String),

    #[error("Malformed explain output: {0}")]
    MalformedExplain(String),

    #[error("Cannot aggregate an empty sample set")]
    EmptyInput,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Recording error: {0}")]
    Recording(String),

    #[error("Warm-up task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<tokio::task::JoinError> for BenchError {
    fn from(err: tokio::task::JoinError) -> Self {
        BenchError::Task(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
