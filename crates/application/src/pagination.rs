//! Paginated list retrieval.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use spaceport_domain::{Credential, Page, request::RequestSpec};
use tracing::debug;

use crate::endpoints::page_url;
use crate::error::ApplicationResult;
use crate::http::{decode, ensure_success};
use crate::ports::HttpClient;

/// Fetches every page of a list endpoint and concatenates the results.
///
/// Pages are requested strictly one after another: page `N + 1` is only
/// requested once page `N` reported a non-null `next`. The first failure
/// aborts the whole listing and drops the pages already received.
pub struct PaginatedFetcher<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> Clone for PaginatedFetcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> PaginatedFetcher<C> {
    /// Creates a fetcher over the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Returns all items of `endpoint`, in page order then within-page order.
    ///
    /// # Errors
    ///
    /// Returns the first transport, status or decode error encountered.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        credential: &Credential,
    ) -> ApplicationResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page_number = 1;

        loop {
            let url = page_url(endpoint, page_number)?;
            let request = RequestSpec::get(url.as_str()).authorized(credential);
            let response = ensure_success(self.client.execute(&request).await?)?;
            let page: Page<T> = decode(&url, &response)?;

            debug!(
                endpoint,
                page = page_number,
                items = page.results.len(),
                has_next = page.has_next(),
                "fetched page"
            );

            let has_next = page.has_next();
            items.extend(page.results);
            if !has_next {
                break;
            }
            page_number += 1;
        }

        Ok(items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::test_support::ScriptedHttpClient;
    use pretty_assertions::assert_eq;
    use spaceport_domain::response::ResponseSpec;

    const ENDPOINT: &str = "https://webfu.se/api/spaces/";

    fn credential() -> Credential {
        Credential::new("tok_abc").unwrap()
    }

    #[tokio::test]
    async fn test_concatenates_pages_in_order() {
        let client = Arc::new(
            ScriptedHttpClient::new()
                .on_get(
                    "https://webfu.se/api/spaces/?page=1",
                    ResponseSpec::json(200, r#"{"results":[1,2],"next":"https://webfu.se/api/spaces/?page=2"}"#),
                )
                .on_get(
                    "https://webfu.se/api/spaces/?page=2",
                    ResponseSpec::json(200, r#"{"results":[3],"next":"https://webfu.se/api/spaces/?page=3"}"#),
                )
                .on_get(
                    "https://webfu.se/api/spaces/?page=3",
                    ResponseSpec::json(200, r#"{"results":[4,5],"next":null}"#),
                ),
        );
        let fetcher = PaginatedFetcher::new(Arc::clone(&client));

        let items: Vec<u32> = fetcher.fetch_all(ENDPOINT, &credential()).await.unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            client.requested_urls(),
            vec![
                "https://webfu.se/api/spaces/?page=1",
                "https://webfu.se/api/spaces/?page=2",
                "https://webfu.se/api/spaces/?page=3",
            ]
        );
    }

    #[tokio::test]
    async fn test_single_page_fetches_once() {
        let client = Arc::new(ScriptedHttpClient::new().on_get(
            "https://webfu.se/api/spaces/?page=1",
            ResponseSpec::json(200, r#"{"results":[{"id":1,"name":"Eng"}],"next":null}"#),
        ));
        let fetcher = PaginatedFetcher::new(Arc::clone(&client));

        let items: Vec<serde_json::Value> = fetcher.fetch_all(ENDPOINT, &credential()).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_every_page_is_authorized() {
        let client = Arc::new(
            ScriptedHttpClient::new()
                .on_get(
                    "https://webfu.se/api/spaces/?page=1",
                    ResponseSpec::json(200, r#"{"results":[],"next":"more"}"#),
                )
                .on_get(
                    "https://webfu.se/api/spaces/?page=2",
                    ResponseSpec::json(200, r#"{"results":[],"next":null}"#),
                ),
        );
        let fetcher = PaginatedFetcher::new(Arc::clone(&client));

        let items: Vec<u32> = fetcher.fetch_all(ENDPOINT, &credential()).await.unwrap();

        assert!(items.is_empty());
        for request in client.requests() {
            assert_eq!(request.headers.get("Authorization"), Some("Token tok_abc"));
        }
    }

    #[tokio::test]
    async fn test_failure_discards_accumulated_pages() {
        let client = Arc::new(
            ScriptedHttpClient::new()
                .on_get(
                    "https://webfu.se/api/spaces/?page=1",
                    ResponseSpec::json(200, r#"{"results":[1],"next":"more"}"#),
                )
                .on_get(
                    "https://webfu.se/api/spaces/?page=2",
                    ResponseSpec::json(500, r#"{"detail":"boom"}"#),
                ),
        );
        let fetcher = PaginatedFetcher::new(Arc::clone(&client));

        let result: ApplicationResult<Vec<u32>> = fetcher.fetch_all(ENDPOINT, &credential()).await;

        let error = result.unwrap_err();
        assert_eq!(error.status().map(|s| s.0), Some(500));
        assert_eq!(client.request_count(), 2);
    }

    #[tokio::test]
    async fn test_malformed_page_is_decode_error() {
        let client = Arc::new(ScriptedHttpClient::new().on_get(
            "https://webfu.se/api/spaces/?page=1",
            ResponseSpec::json(200, "<html>login</html>"),
        ));
        let fetcher = PaginatedFetcher::new(client);

        let result: ApplicationResult<Vec<u32>> = fetcher.fetch_all(ENDPOINT, &credential()).await;

        assert!(matches!(result, Err(ApplicationError::Decode { .. })));
    }
}
