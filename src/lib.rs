//! # GitHub API Rust SDK
//!
//! A Rust SDK for the GitHub API, providing type-safe configuration, an
//! async HTTP client with rate and abuse limit handling, automatic
//! pagination, request logging, and a GraphQL call path.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`GitHubConfig`] and [`GitHubConfigBuilder`]
//! - Validated newtypes for the access token and API base URL
//! - An assembled client, [`GitHubApi`], combining REST and GraphQL access
//! - Automatic pagination over `Link` headers with per-page callbacks
//! - Request logging with per-call correlation ids via `tracing`
//! - Rate/abuse limit backoff driven by configurable handlers
//!
//! ## Quick Start
//!
//! ```rust
//! use github_api::{GitHubApi, GitHubConfig, AccessToken};
//!
//! // Create configuration using the builder pattern
//! let config = GitHubConfig::builder()
//!     .token(AccessToken::new("ghp_example").unwrap())
//!     .build();
//!
//! let api = GitHubApi::new(config);
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use github_api::clients::{HttpRequest, HttpMethod};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "repos/octocat/hello-world")
//!     .build()
//!     .unwrap();
//!
//! let response = api.request(request).await?;
//! println!("stars: {}", response.body["stargazers_count"]);
//! ```
//!
//! ## Pagination
//!
//! List endpoints return one page at a time with a `Link` header pointing
//! at the next page. [`GitHubApi::paginate`] follows those links and
//! returns the concatenated items:
//!
//! ```rust,ignore
//! let request = HttpRequest::builder(HttpMethod::Get, "repos/octocat/hello-world/issues")
//!     .query_param("per_page", "100")
//!     .build()
//!     .unwrap();
//!
//! let issues = api.paginate(request).await?;
//!
//! // Or stop early / capture pages incrementally
//! let issues = api
//!     .paginate_with(request, |response, control| {
//!         if response.body.as_array().is_some_and(|page| page.len() < 100) {
//!             control.done();
//!         }
//!     })
//!     .await?;
//! ```
//!
//! ## GraphQL
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let data = api
//!     .graphql(
//!         "query($login: String!) { user(login: $login) { name } }",
//!         Some(json!({"login": "octocat"})),
//!         None,
//!     )
//!     .await?;
//! ```
//!
//! A response carrying GraphQL errors fails with
//! [`GraphqlError::Query`](clients::graphql::GraphqlError::Query), which
//! preserves the structured error list and any partial `data`.
//!
//! ## Rate and Abuse Limits
//!
//! Throttled responses (403/429 with the relevant headers) are handed to
//! the configured handlers. The defaults log a warning and always retry
//! after the suggested wait; override them to change that policy:
//!
//! ```rust
//! use github_api::{GitHubConfig, ThrottleConfig};
//!
//! let config = GitHubConfig::builder()
//!     .throttle(ThrottleConfig::new().on_abuse_limit(|_retry_after| false))
//!     .build();
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Errors are observed, never swallowed**: logging and pagination
//!   propagate the underlying failure unchanged

pub mod clients;
pub mod config;
pub mod error;
mod github;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiBase, GitHubConfig, GitHubConfigBuilder, ThrottleConfig, ThrottleHandler,
};
pub use error::ConfigError;
pub use github::GitHubApi;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, LoggedClient, MaxHttpRetriesExceededError,
    PageControl, PageLinks, RateLimit, ThrottleEvent, ThrottleHandlers, ThrottleKind,
};

// Re-export GraphQL types for convenience
pub use clients::graphql::{
    GraphQlErrorEntry, GraphQlPayload, GraphQlQueryError, GraphqlClient, GraphqlError,
};
