//! Global application error types.
//!
//! Every failure a request can hit is a [`ServiceError`]. The HTTP mapping
//! lives in `api::common`.

use std::collections::BTreeMap;
use thiserror::Error;

/// Field name to the list of problems found with it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String, errors: FieldErrors },

    /// Unknown user and wrong password are deliberately the same error.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }

    /// Validation failure pinned to a single field.
    pub fn field(field: impl Into<String>, problem: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![problem.into()]);
        Self::validation("Invalid or incomplete data", errors)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
