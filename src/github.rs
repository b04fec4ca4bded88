//! The assembled GitHub API client.
//!
//! This module provides [`GitHubApi`], the facade that wires the base HTTP
//! client together with request logging, automatic pagination, and the
//! GraphQL call path, and installs the default rate/abuse limit handlers.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::pagination::{self, PageControl};
use crate::clients::{
    GraphqlClient, GraphqlError, HttpClient, HttpError, HttpRequest, HttpResponse, LoggedClient,
    ThrottleHandlers,
};
use crate::config::{GitHubConfig, ThrottleConfig};

/// The GitHub API client.
///
/// Aggregates the base HTTP client (wrapped in request logging) with
/// pagination and GraphQL support. Construct one per configuration; each
/// instance is independent, and instances are cheap enough to create freely.
///
/// # Thread Safety
///
/// `GitHubApi` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use github_api::{GitHubApi, GitHubConfig, AccessToken};
/// use github_api::clients::{HttpRequest, HttpMethod};
///
/// let api = GitHubApi::new(
///     GitHubConfig::builder()
///         .token(AccessToken::new("ghp_example").unwrap())
///         .build(),
/// );
///
/// // Plain request
/// let request = HttpRequest::builder(HttpMethod::Get, "user").build().unwrap();
/// let response = api.request(request).await?;
///
/// // Automatic pagination
/// let request = HttpRequest::builder(HttpMethod::Get, "repos/octocat/hello-world/issues")
///     .query_param("per_page", "100")
///     .build()
///     .unwrap();
/// let issues = api.paginate(request).await?;
///
/// // GraphQL
/// let data = api.graphql("query { viewer { login } }", None, None).await?;
/// ```
#[derive(Debug)]
pub struct GitHubApi {
    /// The shared logged HTTP client.
    client: Arc<LoggedClient>,
    /// The GraphQL client, sharing the logged transport.
    graphql: GraphqlClient,
}

// Verify GitHubApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GitHubApi>();
};

impl GitHubApi {
    /// Creates a new client from the given configuration.
    ///
    /// Missing throttle handlers are filled with defaults that log a warning
    /// and unconditionally retry, so no request is ever abandoned due to
    /// rate or abuse limiting unless the caller overrides them.
    #[must_use]
    pub fn new(config: GitHubConfig) -> Self {
        let throttle = resolve_throttle(config.throttle());
        let http = HttpClient::new(&config, throttle);
        Self::from_client(http, &config)
    }

    /// Creates a client around a caller-supplied base HTTP client.
    ///
    /// This is the injection point for a pre-configured transport; the
    /// configuration still drives logging verbosity and the GraphQL
    /// endpoint derivation.
    #[must_use]
    pub fn from_client(http: HttpClient, config: &GitHubConfig) -> Self {
        let client = Arc::new(LoggedClient::new(http, config.debug()));
        let graphql = GraphqlClient::new(Arc::clone(&client), config);
        Self { client, graphql }
    }

    /// Returns the GraphQL endpoint URL derived from the configuration.
    #[must_use]
    pub fn graphql_endpoint(&self) -> &str {
        self.graphql.endpoint()
    }

    /// Sends a single request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on validation, network, or response failure.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.client.request(request).await
    }

    /// Fetches every page of a list endpoint into one ordered sequence.
    ///
    /// Follows `Link: rel="next"` headers sequentially until the server
    /// stops returning one. Items appear in page order, preserving
    /// within-page order.
    ///
    /// There is no built-in page cap: traversal runs as long as the server
    /// keeps returning a `next` link. Use [`paginate_with`](Self::paginate_with)
    /// to stop early.
    ///
    /// # Errors
    ///
    /// Returns the failing page's [`HttpError`]; items accumulated from
    /// earlier pages are discarded.
    pub async fn paginate(&self, request: HttpRequest) -> Result<Vec<Value>, HttpError> {
        pagination::paginate(&self.client, request, None).await
    }

    /// Like [`paginate`](Self::paginate), invoking `on_page` once per page.
    ///
    /// The callback receives the raw page response and a [`PageControl`];
    /// calling [`PageControl::done`] stops traversal after the current page.
    /// This is also the way to capture per-page results incrementally, since
    /// a failure discards the accumulated sequence.
    ///
    /// # Errors
    ///
    /// Returns the failing page's [`HttpError`].
    pub async fn paginate_with<F>(
        &self,
        request: HttpRequest,
        mut on_page: F,
    ) -> Result<Vec<Value>, HttpError>
    where
        F: FnMut(&HttpResponse, &mut PageControl) + Send,
    {
        pagination::paginate(&self.client, request, Some(&mut on_page)).await
    }

    /// Executes a GraphQL query against the derived endpoint.
    ///
    /// Issues exactly one POST per invocation. Resolves with the response's
    /// `data` field; a response carrying GraphQL errors fails with
    /// [`GraphqlError::Query`], which preserves the error list and any
    /// partial `data`.
    ///
    /// # Errors
    ///
    /// See [`GraphqlClient::graphql`].
    pub async fn graphql(
        &self,
        query: &str,
        variables: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Option<Value>, GraphqlError> {
        self.graphql.graphql(query, variables, headers).await
    }

    /// Executes a GraphQL query.
    ///
    /// # Errors
    ///
    /// See [`GitHubApi::graphql`].
    #[deprecated(since = "0.1.0", note = "use `graphql` instead")]
    pub async fn query(
        &self,
        query: &str,
        variables: Option<Value>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Option<Value>, GraphqlError> {
        self.graphql(query, variables, headers).await
    }
}

/// Resolves throttle configuration into concrete handlers.
///
/// Caller-supplied handlers take precedence; missing slots get defaults
/// that log one warning naming the wait and always request a retry.
pub(crate) fn resolve_throttle(config: &ThrottleConfig) -> ThrottleHandlers {
    let on_rate_limit = config.rate_limit_handler().cloned().unwrap_or_else(|| {
        Arc::new(|retry_after: f64| {
            tracing::warn!("Rate limit hit, retrying in {retry_after} seconds");
            true
        })
    });

    let on_abuse_limit = config.abuse_limit_handler().cloned().unwrap_or_else(|| {
        Arc::new(|retry_after: f64| {
            tracing::warn!("Abuse limit hit, retrying in {retry_after} seconds");
            true
        })
    });

    ThrottleHandlers {
        on_rate_limit,
        on_abuse_limit,
    }
}
