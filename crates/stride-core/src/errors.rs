//! Cross-cutting error types for Stride.
//!
//! Store and resolver errors (`DatabaseError`, `SchemaError`) live in their
//! own crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Stride crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {key}")]
    NotFound { entity_type: String, key: String },

    /// Input failed validation (missing or blank required field, bad value).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub fn not_found(entity_type: &str, key: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
        }
    }
}
