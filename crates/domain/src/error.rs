//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The API credential is empty or whitespace.
    #[error("API key is required")]
    EmptyCredential,

    /// The API domain is empty or malformed.
    #[error("invalid API domain: {0}")]
    InvalidDomain(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A user identifier is not a positive integer.
    #[error("invalid user ID: {0}")]
    InvalidUserId(String),

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
