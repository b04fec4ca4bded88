//! HTTP client types for GitHub API communication.
//!
//! This module provides the foundational HTTP client layer for making
//! authenticated requests to the GitHub API, plus the decorating components
//! assembled by [`GitHubApi`](crate::GitHubApi): request logging, automatic
//! pagination, and the GraphQL call path.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`LoggedClient`]: Logging wrapper attaching correlation ids
//! - [`PageControl`]: Early-stop control for pagination callbacks
//! - [`ThrottleHandlers`]: Resolved rate/abuse limit handlers
//! - [`graphql::GraphqlClient`]: GraphQL client sharing the logged transport
//! - [`graphql::GraphqlError`]: GraphQL-specific error types
//!
//! # Throttle and Retry Behavior
//!
//! The client separates two recovery mechanisms:
//!
//! - **Rate/abuse limits (403/429)**: classified into a
//!   [`ThrottleEvent`] and handed to the configured handler, which decides
//!   whether to wait and retry. The default handlers installed by
//!   [`GitHubApi`](crate::GitHubApi) log a warning and always retry.
//! - **Server errors (500)**: retried with a fixed 1-second delay, up to
//!   the request's `tries` budget (default 1, meaning no retry).

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;
mod logging;
pub(crate) mod pagination;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, ThrottleHandlers, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, PageLinks, RateLimit, ThrottleEvent, ThrottleKind};
pub use logging::LoggedClient;
pub use pagination::PageControl;

// Re-export GraphQL client types at the clients module level
pub use graphql::{GraphqlClient, GraphqlError};
