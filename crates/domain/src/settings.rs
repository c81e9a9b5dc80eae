//! Operator settings.
//!
//! Loaded from a JSON settings file; command-line flags and environment
//! variables take precedence over what is stored here.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::credential::ApiDomain;

/// Default root of the template repository listing.
pub const DEFAULT_TEMPLATE_REPOSITORY: &str =
    "https://api.github.com/repos/JSPOON3R/webfuse-spaces/contents/";

/// Operator settings for the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Domain of the space management API.
    #[serde(default)]
    pub api_domain: ApiDomain,

    /// Directory-listing URL of the template repository root.
    #[serde(default = "default_template_repository")]
    pub template_repository: String,

    /// Where downloads are written. The working directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_template_repository() -> String {
    DEFAULT_TEMPLATE_REPOSITORY.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl Settings {
    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns the download directory, defaulting to the working directory.
    #[must_use]
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_domain: ApiDomain::default(),
            template_repository: default_template_repository(),
            download_dir: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_domain.as_str(), "webfu.se");
        assert_eq!(settings.template_repository, DEFAULT_TEMPLATE_REPOSITORY);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.download_dir(), PathBuf::from("."));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"api_domain":"sbox.net"}"#).unwrap();
        assert_eq!(settings.api_domain.as_str(), "sbox.net");
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn invalid_domain_is_rejected() {
        let result = serde_json::from_str::<Settings>(r#"{"api_domain":"https://sbox.net"}"#);
        assert!(result.is_err());
    }
}
