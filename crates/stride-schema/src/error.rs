//! Resolver and schema registry error types.

use stride_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// The store failed while resolving a field.
    #[error(transparent)]
    Store(#[from] DatabaseError),

    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),
}
