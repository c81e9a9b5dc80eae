//! Typed access to the space management API.

use std::sync::Arc;

use spaceport_domain::request::RequestSpec;
use spaceport_domain::{
    ApiDomain, CreatedSpace, Credential, MemberAssignment, SpaceDocument, SpaceId, SpaceSummary, User,
};
use tracing::info;

use crate::endpoints::ApiEndpoints;
use crate::error::{ApplicationError, ApplicationResult};
use crate::http::{decode, ensure_success};
use crate::pagination::PaginatedFetcher;
use crate::ports::HttpClient;

/// Issues authenticated calls against one API domain.
pub struct SpaceGateway<C: HttpClient> {
    client: Arc<C>,
    endpoints: ApiEndpoints,
    pages: PaginatedFetcher<C>,
}

impl<C: HttpClient> Clone for SpaceGateway<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            endpoints: self.endpoints.clone(),
            pages: self.pages.clone(),
        }
    }
}

impl<C: HttpClient> SpaceGateway<C> {
    /// Creates a gateway for the given domain.
    pub fn new(client: Arc<C>, domain: &ApiDomain) -> Self {
        Self::with_endpoints(client, ApiEndpoints::new(domain))
    }

    /// Creates a gateway over an explicit endpoint catalogue.
    pub fn with_endpoints(client: Arc<C>, endpoints: ApiEndpoints) -> Self {
        Self {
            pages: PaginatedFetcher::new(Arc::clone(&client)),
            client,
            endpoints,
        }
    }

    /// Returns the endpoint catalogue.
    pub const fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Lists every space visible to the credential.
    ///
    /// # Errors
    ///
    /// Fails on the first page that cannot be fetched.
    pub async fn list_spaces(&self, credential: &Credential) -> ApplicationResult<Vec<SpaceSummary>> {
        self.pages.fetch_all(&self.endpoints.spaces(), credential).await
    }

    /// Lists every user of the credential's company.
    ///
    /// # Errors
    ///
    /// Fails on the first page that cannot be fetched.
    pub async fn list_users(&self, credential: &Credential) -> ApplicationResult<Vec<User>> {
        self.pages
            .fetch_all(&self.endpoints.company_users(), credential)
            .await
    }

    /// Downloads the full JSON document of a space.
    ///
    /// # Errors
    ///
    /// Returns transport, status or decode errors.
    pub async fn export_space(
        &self,
        credential: &Credential,
        id: &SpaceId,
    ) -> ApplicationResult<SpaceDocument> {
        let url = self.endpoints.space_export(id)?;
        let request = RequestSpec::get(url.as_str()).authorized(credential);
        let response = ensure_success(self.client.execute(&request).await?)?;
        decode(&url, &response)
    }

    /// Creates a new space from a document.
    ///
    /// # Errors
    ///
    /// Returns transport, status or decode errors.
    pub async fn create_space(
        &self,
        credential: &Credential,
        document: &SpaceDocument,
    ) -> ApplicationResult<CreatedSpace> {
        let url = self.endpoints.space_import();
        let request =
            RequestSpec::post_json(url.as_str(), document.to_compact_string()).authorized(credential);
        let response = ensure_success(self.client.execute(&request).await?)?;
        let created: CreatedSpace = decode(&url, &response)?;
        info!(space_id = %created.id, name = %created.name, "space created");
        Ok(created)
    }

    /// Adds a member to a space.
    ///
    /// # Errors
    ///
    /// Returns transport or status errors.
    pub async fn add_member(
        &self,
        credential: &Credential,
        space: &SpaceId,
        assignment: MemberAssignment,
    ) -> ApplicationResult<()> {
        let url = self.endpoints.space_members(space)?;
        let body = serde_json::to_string(&assignment)
            .map_err(|e| ApplicationError::InvalidJson(format!("Invalid member assignment: {e}")))?;
        let request = RequestSpec::post_json(url, body).authorized(credential);
        ensure_success(self.client.execute(&request).await?)?;
        info!(
            space_id = %space,
            member = %assignment.member,
            role = assignment.role.as_str(),
            "member added"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedHttpClient;
    use pretty_assertions::assert_eq;
    use spaceport_domain::UserId;
    use spaceport_domain::request::{HttpMethod, RequestBody};
    use spaceport_domain::response::ResponseSpec;

    fn credential() -> Credential {
        Credential::new("tok_abc").unwrap()
    }

    #[tokio::test]
    async fn test_create_space_posts_document_verbatim() {
        let client = Arc::new(ScriptedHttpClient::new().on_post(
            "https://webfu.se/api/spaces/import/",
            ResponseSpec::json(201, r#"{"id":42,"name":"New Space"}"#),
        ));
        let gateway = SpaceGateway::new(Arc::clone(&client), &ApiDomain::default());
        let document = SpaceDocument::parse(r#"{"name":"New Space","widgets":[1,2]}"#).unwrap();

        let created = gateway.create_space(&credential(), &document).await.unwrap();

        assert_eq!(created.id.as_str(), "42");
        let request = &client.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body.content, r#"{"name":"New Space","widgets":[1,2]}"#);
        assert_eq!(request.body, RequestBody::json(r#"{"name":"New Space","widgets":[1,2]}"#));
        assert_eq!(request.headers.get("Authorization"), Some("Token tok_abc"));
    }

    #[tokio::test]
    async fn test_add_member_body() {
        let client = Arc::new(ScriptedHttpClient::new().on_post(
            "https://webfu.se/api/spaces/42/members/",
            ResponseSpec::json(201, "{}"),
        ));
        let gateway = SpaceGateway::new(Arc::clone(&client), &ApiDomain::default());
        let space = SpaceId::new("42").unwrap();

        gateway
            .add_member(&credential(), &space, MemberAssignment::admin(UserId::new(7).unwrap()))
            .await
            .unwrap();

        assert_eq!(client.requests()[0].body.content, r#"{"member":7,"role":"admin"}"#);
    }

    #[tokio::test]
    async fn test_export_rejects_non_success() {
        let client = Arc::new(ScriptedHttpClient::new().on_get(
            "https://webfu.se/api/spaces/9/export/",
            ResponseSpec::json(403, r#"{"detail":"forbidden"}"#),
        ));
        let gateway = SpaceGateway::new(client, &ApiDomain::default());

        let error = gateway
            .export_space(&credential(), &SpaceId::new("9").unwrap())
            .await
            .unwrap_err();

        assert_eq!(error.status().map(|s| s.0), Some(403));
        assert!(error.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_list_users() {
        let client = Arc::new(ScriptedHttpClient::new().on_get(
            "https://webfu.se/api/company/users/?page=1",
            ResponseSpec::json(
                200,
                r#"{"results":[{"id":7,"first_name":"Ada","last_name":"L","email":"a@x.io"}],"next":null}"#,
            ),
        ));
        let gateway = SpaceGateway::new(client, &ApiDomain::default());

        let users = gateway.list_users(&credential()).await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id.get(), 7);
    }
}
