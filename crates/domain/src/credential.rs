//! API credential and target domain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Domains offered as presets. Any other host may still be typed freely.
pub const KNOWN_DOMAINS: &[&str] = &["webfu.se", "webfuse.com", "sbox.net"];

/// Company REST API key forwarded on every authenticated request.
///
/// The value is never printed by `Debug` so it can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Creates a credential from user input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyCredential` if the input is blank.
    pub fn new(token: impl Into<String>) -> DomainResult<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyCredential);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the value of the `Authorization` header.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("Token {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl FromStr for Credential {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Host of the space management API, substituted into `https://<domain>/api`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiDomain(String);

impl ApiDomain {
    /// Creates a validated domain.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDomain` if the host is empty or carries
    /// a scheme, path or whitespace.
    pub fn new(domain: impl Into<String>) -> DomainResult<Self> {
        let domain = domain.into();
        let trimmed = domain.trim();
        if trimmed.is_empty()
            || trimmed.contains("://")
            || trimmed.contains('/')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(DomainError::InvalidDomain(domain));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the host name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this domain is one of the presets.
    #[must_use]
    pub fn is_known(&self) -> bool {
        KNOWN_DOMAINS.contains(&self.0.as_str())
    }

    /// Returns the API base URL without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("https://{}/api", self.0)
    }
}

impl Default for ApiDomain {
    fn default() -> Self {
        Self(KNOWN_DOMAINS[0].to_string())
    }
}

impl fmt::Display for ApiDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApiDomain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ApiDomain {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApiDomain> for String {
    fn from(value: ApiDomain) -> Self {
        value.0
    }
}
