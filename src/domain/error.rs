use thiserror::Error;

use super::ids::IdentifierError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    #[error("domain validation failed: {message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
