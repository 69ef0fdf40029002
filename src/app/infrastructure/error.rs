use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Service returned HTTP {status} for {path}")]
    Http { status: i32, path: String },

    #[error("Settings error: {0}")]
    Settings(String),
}

impl From<minreq::Error> for AppError {
    fn from(err: minreq::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
