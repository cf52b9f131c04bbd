//! Top-level error taxonomy.
//!
//! Validation errors stay local to the offending field and never reach the
//! network. API errors carry the server's code and kwargs so the UI can
//! resolve localized text via `gtv("error_<code>")`. Background stream
//! failures are silent; only user-initiated actions surface errors.

use crate::api::ApiError;
use crate::domain::decimal::DecimalError;
use crate::engine::fields::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Auth lapses are handled by clearing the token and returning to init,
    /// never by transparent repair.
    pub fn is_auth_lapse(&self) -> bool {
        matches!(self, AppError::Api(ApiError::Unauthorized))
    }
}

impl From<DecimalError> for AppError {
    fn from(err: DecimalError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        AppError::Validation(err.to_string())
    }
}
