//! GraphQL client implementation for the GitHub API.
//!
//! This module provides the [`GraphqlClient`] type for executing GraphQL
//! queries against the GitHub GraphQL endpoint derived from the configured
//! base URL.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::clients::graphql::{GraphQlErrorEntry, GraphQlQueryError, GraphqlError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::logging::LoggedClient;
use crate::config::GitHubConfig;

/// A decoded GraphQL response payload.
///
/// GitHub returns GraphQL results with HTTP 200 regardless of query-level
/// failure; `errors` is non-empty when the query failed, and `data` carries
/// whatever the server resolved (possibly alongside errors).
#[derive(Debug, Deserialize)]
pub struct GraphQlPayload {
    /// The resolved response data, if any.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Structured errors, empty on full success.
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

/// GraphQL API client for the GitHub API.
///
/// Issues exactly one POST per call to the GraphQL endpoint, sharing the
/// logged HTTP client with the REST side so every query is logged and
/// throttled the same way.
///
/// # Endpoint Derivation
///
/// The endpoint tracks the configured REST base URL, so GitHub Enterprise
/// installations work without separate configuration:
///
/// - `https://api.github.com` -> `https://api.github.com/graphql`
/// - `https://ghe.example.com/api/v3` -> `https://ghe.example.com/api/graphql`
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct GraphqlClient {
    /// The shared logged HTTP client.
    client: Arc<LoggedClient>,
    /// The derived GraphQL endpoint URL.
    endpoint: String,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client over the shared logged HTTP client.
    ///
    /// The endpoint is derived from the configuration's base URL.
    #[must_use]
    pub fn new(client: Arc<LoggedClient>, config: &GitHubConfig) -> Self {
        let endpoint = derive_endpoint(config.base_url().as_ref());
        Self { client, endpoint }
    }

    /// Returns the GraphQL endpoint URL this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Executes a GraphQL query.
    ///
    /// Sends one POST with `{"query": ..., "variables": ...}` to the derived
    /// endpoint. Extra headers are merged into the request. There is no
    /// caching and no retry beyond the shared client's throttle handling.
    ///
    /// # Returns
    ///
    /// The `data` field of the response on success. GitHub may return
    /// `data: null` for queries that resolve to nothing.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] for transport-level failures
    /// - [`GraphqlError::Query`] when the response carries a non-empty
    ///   `errors` array; the partial `data` rides along on the error
    /// - [`GraphqlError::Decode`] when the body is not a GraphQL payload
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use serde_json::json;
    ///
    /// let data = client
    ///     .graphql(
    ///         "query($owner: String!, $name: String!) { repository(owner: $owner, name: $name) { stargazerCount } }",
    ///         Some(json!({"owner": "octocat", "name": "hello-world"})),
    ///         None,
    ///     )
    ///     .await?;
    /// ```
    pub async fn graphql(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Option<serde_json::Value>, GraphqlError> {
        // Construct the request body
        let body = serde_json::json!({
            "query": query,
            "variables": variables
        });

        // Build the request
        let mut builder = HttpRequest::builder(HttpMethod::Post, self.endpoint.clone()).body(body);

        // Add extra headers if provided
        if let Some(extra_headers) = headers {
            builder = builder.extra_headers(extra_headers);
        }

        let request = builder.build().map_err(|e| GraphqlError::Http(e.into()))?;
        let response = self.client.request(request).await?;

        let payload: GraphQlPayload = serde_json::from_value(response.body)?;
        if payload.errors.is_empty() {
            Ok(payload.data)
        } else {
            Err(GraphqlError::Query(GraphQlQueryError {
                errors: payload.errors,
                data: payload.data,
            }))
        }
    }
}

/// Derives the GraphQL endpoint from a REST base URL.
///
/// GitHub Enterprise serves REST under `/api/v3` and GraphQL under
/// `/api/graphql`; everywhere else the endpoint is `/graphql` under the
/// base.
fn derive_endpoint(base_url: &str) -> String {
    base_url.strip_suffix("/api/v3").map_or_else(
        || format!("{base_url}/graphql"),
        |host| format!("{host}/api/graphql"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_derive_endpoint_public_api() {
        assert_eq!(
            derive_endpoint("https://api.github.com"),
            "https://api.github.com/graphql"
        );
    }

    #[test]
    fn test_derive_endpoint_enterprise() {
        assert_eq!(
            derive_endpoint("https://ghe.example.com/api/v3"),
            "https://ghe.example.com/api/graphql"
        );
    }

    #[test]
    fn test_derive_endpoint_custom_proxy() {
        assert_eq!(
            derive_endpoint("http://localhost:8080"),
            "http://localhost:8080/graphql"
        );
    }

    #[test]
    fn test_payload_decodes_success_shape() {
        let payload: GraphQlPayload =
            serde_json::from_value(json!({"data": {"viewer": {"login": "octocat"}}})).unwrap();

        assert_eq!(payload.data, Some(json!({"viewer": {"login": "octocat"}})));
        assert!(payload.errors.is_empty());
    }

    #[test]
    fn test_payload_decodes_partial_failure_shape() {
        let payload: GraphQlPayload = serde_json::from_value(json!({
            "data": {"repository": null},
            "errors": [{"message": "Could not resolve repository"}]
        }))
        .unwrap();

        assert_eq!(payload.data, Some(json!({"repository": null})));
        assert_eq!(payload.errors.len(), 1);
    }

    #[test]
    fn test_payload_tolerates_missing_fields() {
        let payload: GraphQlPayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.data.is_none());
        assert!(payload.errors.is_empty());
    }
}
