//! Error types for the account platform
//!
//! This module provides a unified error handling system shared by the account
//! service and the API gateway. It distinguishes field-level validation
//! failures, business-rule rejections, missing resources and upstream failures.

use std::fmt::Display;
use thiserror::Error;

/// Account platform error type
#[derive(Debug, Error)]
pub enum Error {
    /// A static field rule was violated by an account request
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A customer-type validation chain rejected the account
    #[error("Business rule violated: {0}")]
    BusinessRule(String),

    /// Error when an account cannot be found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Error when the customer service has no record for a customer
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// The customer service failed or answered with something unreadable
    #[error("Customer service error: {0}")]
    CustomerService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Decimal conversion error
    #[error("Decimal conversion error: {0}")]
    DecimalError(String),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than a failure
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::ValidationError(_)
                | Error::BusinessRule(_)
                | Error::AccountNotFound(_)
                | Error::CustomerNotFound(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::CustomerService(msg) => Error::CustomerService(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::DecimalError(msg) => Error::DecimalError(format!("{}: {}", context, msg)),
                // Rule messages reach the caller verbatim
                Error::ValidationError(msg) => Error::ValidationError(msg),
                Error::BusinessRule(msg) => Error::BusinessRule(msg),
                Error::AccountNotFound(msg) => Error::AccountNotFound(msg),
                Error::CustomerNotFound(msg) => Error::CustomerNotFound(msg),
                Error::Database(e) => Error::Database(e),
                Error::Migration(e) => Error::Migration(e),
                Error::Serialization(e) => Error::Serialization(e),
            }
        })
    }
}

/// From rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::DecimalError(err.to_string())
    }
}
