//! URL catalogue of the space management API.

use spaceport_domain::{ApiDomain, DomainError, DomainResult, SpaceId};
use url::Url;

/// Builds endpoint URLs under `https://<domain>/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base: String,
}

impl ApiEndpoints {
    /// Creates the catalogue for a domain.
    #[must_use]
    pub fn new(domain: &ApiDomain) -> Self {
        Self::with_base(domain.api_base())
    }

    /// Creates the catalogue for an explicit API base URL.
    #[must_use]
    pub fn with_base(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// `GET` list of spaces (paginated).
    #[must_use]
    pub fn spaces(&self) -> String {
        format!("{}/spaces/", self.base)
    }

    /// `GET` full JSON document of one space.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the base is not an absolute URL.
    pub fn space_export(&self, id: &SpaceId) -> DomainResult<String> {
        self.space_path(id, "export")
    }

    /// `POST` a space document to create a new space.
    #[must_use]
    pub fn space_import(&self) -> String {
        format!("{}/spaces/import/", self.base)
    }

    /// `POST` a member assignment to a space.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the base is not an absolute URL.
    pub fn space_members(&self, id: &SpaceId) -> DomainResult<String> {
        self.space_path(id, "members")
    }

    /// `GET` list of company users (paginated).
    #[must_use]
    pub fn company_users(&self) -> String {
        format!("{}/company/users/", self.base)
    }

    /// `<base>/spaces/<id>/<action>/`, with the id percent-encoded as one segment.
    fn space_path(&self, id: &SpaceId, action: &str) -> DomainResult<String> {
        let invalid = |detail: String| DomainError::InvalidUrl(format!("{detail}: {}", self.base));
        let mut url = Url::parse(&self.base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["spaces", id.as_str(), action, ""]);
        Ok(url.into())
    }
}

/// Appends `page=<n>` to a list endpoint, keeping any existing query.
///
/// # Errors
///
/// Returns `DomainError::InvalidUrl` if the endpoint is not an absolute URL.
pub fn page_url(endpoint: &str, page: u32) -> DomainResult<String> {
    let mut url = Url::parse(endpoint).map_err(|e| DomainError::InvalidUrl(format!("{e}: {endpoint}")))?;
    url.query_pairs_mut().append_pair("page", &page.to_string());
    Ok(url.into())
}
