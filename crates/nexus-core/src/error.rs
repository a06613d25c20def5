use thiserror::Error;
use uuid::Uuid;

/// Input rejected before any store call. `field` names the offending form control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("{field} is required"),
        }
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("client {0} not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
