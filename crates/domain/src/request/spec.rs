//! Request specification type

use serde::{Deserialize, Serialize};

use super::{Header, Headers, HttpMethod, RequestBody};
use crate::credential::Credential;

/// Complete specification for an outbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Request body
    #[serde(default)]
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates a GET request for the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::none(),
        }
    }

    /// Creates a POST request carrying a JSON body.
    #[must_use]
    pub fn post_json(url: impl Into<String>, json: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Headers::new(),
            body: RequestBody::json(json),
        }
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(Header::new(name, value));
        self
    }

    /// Attaches the `Authorization: Token <credential>` header.
    #[must_use]
    pub fn authorized(self, credential: &Credential) -> Self {
        self.with_header("Authorization", credential.authorization_value())
    }
}
