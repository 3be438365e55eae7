//! Trait abstraction for the save handler to enable mocking in tests

use crate::state::FormValues;
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a save handler
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The service refused the values; carries its explanation
    #[error("{0}")]
    Rejected(String),
    #[error("The profile service is unavailable")]
    Unavailable,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Asynchronous save operation invoked with validated form values
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, values: FormValues) -> Result<(), SubmitError>;
}
