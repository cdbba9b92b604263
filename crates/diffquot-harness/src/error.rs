//! Harness errors.

use diffquot_core::DiffQuotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Core(#[from] DiffQuotError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported precision '{0}', expected f32|f64|both")]
    UnknownPrecision(String),
    #[error("unsupported summation order '{0}', expected forward|reverse")]
    UnknownOrder(String),
    #[error("unsupported format '{0}', expected text|json")]
    UnknownFormat(String),
}
