//! Application error types

use spaceport_domain::response::StatusCode;
use spaceport_domain::{CreatedSpace, DomainError};
use thiserror::Error;

use crate::ports::{FileSystemError, HttpClientError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A required input is missing.
    #[error("{0}")]
    Validation(String),

    /// The request never produced a response.
    #[error(transparent)]
    Http(#[from] HttpClientError),

    /// The server answered with a non-success status.
    #[error("HTTP error! status: {status}{}", body_suffix(.body))]
    Status {
        /// Status returned by the server.
        status: StatusCode,
        /// Response body, as text.
        body: String,
    },

    /// JSON content failed to parse. The message names the source.
    #[error("{0}")]
    InvalidJson(String),

    /// A response body did not have the expected shape.
    #[error("unexpected response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder message.
        message: String,
    },

    /// The space exists remotely but the administrator was not added.
    #[error("space {space} was created, but admin assignment failed: {reason}")]
    AdminAssignmentFailed {
        /// The space that was created.
        space: CreatedSpace,
        /// Why the member request failed.
        #[source]
        reason: Box<ApplicationError>,
    },

    /// Reading or writing a local file failed.
    #[error("file system error: {0}")]
    FileSystem(#[from] FileSystemError),
}

fn body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {body}")
    }
}

/// Broad error categories shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input; the action never started.
    Validation,
    /// Transport failure or non-success HTTP status.
    Network,
    /// Malformed JSON content.
    Content,
    /// A space was created but the follow-up step failed.
    PartialFailure,
    /// Local file I/O failed.
    Local,
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::Validation(_) => ErrorKind::Validation,
            Self::Http(_) | Self::Status { .. } | Self::Decode { .. } => ErrorKind::Network,
            Self::InvalidJson(_) => ErrorKind::Content,
            Self::AdminAssignmentFailed { .. } => ErrorKind::PartialFailure,
            Self::FileSystem(_) => ErrorKind::Local,
        }
    }

    /// Returns the HTTP status if the server rejected the request.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
