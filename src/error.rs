use axum::http::StatusCode;
use thiserror::Error;

/// Rejections raised while building domain values from caller input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DomainError::InvalidInput(msg.into())
    }
}

impl From<DomainError> for (StatusCode, String) {
    fn from(e: DomainError) -> Self {
        (StatusCode::BAD_REQUEST, e.to_string())
    }
}

pub fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    tracing::error!(error = %e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
