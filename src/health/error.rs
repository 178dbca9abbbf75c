use std::time::Duration;

use thiserror::Error;

use crate::version::error::MismatchError;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out after {0:?} waiting for the server version")]
    Timeout(Duration),

    #[error(transparent)]
    Mismatch(#[from] MismatchError),
}
