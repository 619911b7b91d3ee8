use thiserror::Error;

pub type AppResult<T> = core::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("network error: {0}")]
    Network(String),
    #[error("recipe API error: {0}")]
    Api(String),
    #[error("could not parse ingredient '{line}': {reason}")]
    Ingredient { line: String, reason: String },
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}
