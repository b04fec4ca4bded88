//! GraphQL API client for the GitHub API.
//!
//! This module provides a GraphQL client built on top of the shared
//! [`LoggedClient`](crate::clients::LoggedClient) that executes queries
//! against the GraphQL endpoint derived from the configured base URL.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GraphqlClient`]: The GraphQL client with its `graphql()` method
//! - [`GraphqlError`]: Error type for GraphQL API operations
//! - [`GraphQlQueryError`]: A query-level failure carrying partial data
//! - [`GraphQlErrorEntry`]: One structured error from the server
//!
//! # Response Contract
//!
//! GitHub returns GraphQL results with HTTP 200 regardless of query-level
//! failure. This client inspects the payload's `errors` array:
//!
//! - Empty or absent: the call resolves with the `data` field only.
//! - Non-empty: the call fails with [`GraphqlError::Query`], which carries
//!   both the error list and whatever partial `data` the server resolved.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_api::{GitHubApi, GitHubConfig};
//!
//! let api = GitHubApi::new(GitHubConfig::builder().build());
//!
//! let data = api
//!     .graphql("query { viewer { login } }", None, None)
//!     .await?;
//! println!("logged in as {:?}", data);
//! ```

mod client;
mod errors;

pub use client::{GraphQlPayload, GraphqlClient};
pub use errors::{GraphQlErrorEntry, GraphQlQueryError, GraphqlError, Location, PathSegment};
