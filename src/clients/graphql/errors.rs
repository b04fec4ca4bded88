//! GraphQL-specific error types for the GitHub API SDK.
//!
//! This module contains error types for GraphQL API operations. A GraphQL
//! response can fail at two levels: the transport (non-2xx status, network
//! failure) and the query itself (HTTP 200 with a non-empty `errors` array).
//! Query-level failures preserve any partial `data` the server resolved.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::clients::graphql::GraphqlError;
//!
//! match api.graphql(query, None, None).await {
//!     Ok(data) => println!("data: {data:?}"),
//!     Err(GraphqlError::Query(failure)) => {
//!         // Partial results are still available
//!         println!("{} errors, partial data: {:?}", failure.errors.len(), failure.data);
//!     }
//!     Err(other) => println!("transport error: {other}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::HttpError;

/// A position within the GraphQL document an error refers to.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

/// One segment of a GraphQL error path: a field name or a list index.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object field name.
    Field(String),
    /// A list index.
    Index(u64),
}

/// A structured error entry from a GraphQL response.
///
/// Wire-compatible with the GraphQL specification: only `message` is
/// guaranteed; `path`, `locations`, and `extensions` appear when the server
/// supplies them.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GraphQlErrorEntry {
    /// Human-readable description of the error.
    pub message: String,
    /// Path to the response field the error applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    /// Positions in the query document associated with the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    /// Server-defined extra information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Error raised when a GraphQL response carries a non-empty `errors` array.
///
/// The server may have resolved part of the query before failing; `data`
/// carries whatever it produced so callers can decide whether the partial
/// result is usable.
#[derive(Debug, Error)]
#[error("{}", display_query_failure(.errors))]
pub struct GraphQlQueryError {
    /// The structured errors, in server order.
    pub errors: Vec<GraphQlErrorEntry>,
    /// The partial response data, if any was resolved.
    pub data: Option<serde_json::Value>,
}

/// Builds the display message for a query failure.
fn display_query_failure(errors: &[GraphQlErrorEntry]) -> String {
    errors.first().map_or_else(
        || "GraphQL query failed".to_string(),
        |first| {
            format!(
                "GraphQL query failed with {} error(s); first: {}",
                errors.len(),
                first.message
            )
        },
    )
}

/// Error type for GraphQL API operations.
///
/// # Example
///
/// ```rust
/// use github_api::clients::graphql::{GraphqlError, GraphQlQueryError};
///
/// let failure = GraphQlQueryError {
///     errors: vec![],
///     data: None,
/// };
/// let error: GraphqlError = failure.into();
/// assert!(matches!(error, GraphqlError::Query(_)));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    ///
    /// This variant wraps [`HttpError`] for unified error handling.
    /// It includes network errors, non-2xx responses, and retry exhaustion.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The query executed but the response carried GraphQL errors.
    #[error(transparent)]
    Query(#[from] GraphQlQueryError),

    /// The response body was not a decodable GraphQL payload.
    #[error("Failed to decode GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),
}
