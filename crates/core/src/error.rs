//! Domain error type shared across the workspace.

use thiserror::Error;

/// Convenience result alias for domain operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced by the domain layer.
///
/// HTTP mapping lives in `weddit-api`; this type stays transport-agnostic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An entity lookup missed.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Input failed validation (bad enum value, negative price, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Anything that should never happen in normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with a displayable id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Shorthand for a [`CoreError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
