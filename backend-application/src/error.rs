use thiserror::Error;

/// Every core operation is total, so callers only ever see client errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
}
