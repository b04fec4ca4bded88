//! Request logging decorator.
//!
//! This module provides the [`LoggedClient`] type, which wraps an
//! [`HttpClient`] and records every outbound request under a short
//! correlation id so a request and its outcome can be matched up in logs.
//!
//! All output goes through the `tracing` facade; the decorator installs no
//! subscriber and emits nothing unless one is listening. Errors are observed
//! and returned unchanged.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::clients::errors::HttpError;
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Length of the per-request correlation id.
const CORRELATION_ID_LEN: usize = 5;

/// Maximum number of header entries included in verbose response logging.
const HEADER_LOG_LIMIT: usize = 8;

/// Generates a short random correlation id for one request's lifecycle.
///
/// Only per-call uniqueness matters; the format is not a contract.
fn correlation_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CORRELATION_ID_LEN)
        .map(char::from)
        .collect()
}

/// An [`HttpClient`] wrapper that logs every request and its outcome.
///
/// Each call is tagged with a fresh correlation id, logged at debug level
/// before the request is sent and again when it completes. Failures are
/// logged at warn level with the status code when one is available, and the
/// original error is returned unmodified.
///
/// # Example
///
/// ```rust,ignore
/// use github_api::clients::{HttpRequest, HttpMethod, LoggedClient};
///
/// let client = LoggedClient::new(http_client, false);
/// let request = HttpRequest::builder(HttpMethod::Get, "user/repos")
///     .build()
///     .unwrap();
///
/// // Logged as e.g. "sending request" {id="x7Kp2", method=get, target=user/repos}
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct LoggedClient {
    /// The wrapped HTTP client.
    inner: HttpClient,
    /// Whether to log a response header snapshot at trace level.
    verbose: bool,
}

// Verify LoggedClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LoggedClient>();
};

impl LoggedClient {
    /// Creates a new logging wrapper around `inner`.
    ///
    /// `verbose` corresponds to the configuration's `debug` flag and adds a
    /// trace-level response header snapshot on success.
    #[must_use]
    pub const fn new(inner: HttpClient, verbose: bool) -> Self {
        Self { inner, verbose }
    }

    /// Returns the wrapped client.
    #[must_use]
    pub const fn inner(&self) -> &HttpClient {
        &self.inner
    }

    /// Sends a request through the wrapped client, logging its lifecycle.
    ///
    /// # Errors
    ///
    /// Returns whatever [`HttpClient::request`] returns, unchanged.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let id = correlation_id();
        tracing::debug!(
            %id,
            method = %request.http_method,
            target = %request.path,
            "sending request"
        );

        match self.inner.request(request).await {
            Ok(response) => {
                tracing::debug!(
                    %id,
                    status = response.code,
                    request_id = response.request_id().unwrap_or(""),
                    "request completed"
                );
                if self.verbose {
                    tracing::trace!(
                        %id,
                        headers = ?truncated_headers(&response),
                        "response headers"
                    );
                }
                Ok(response)
            }
            Err(error) => {
                match error.status() {
                    Some(status) => {
                        tracing::warn!(%id, status, "request failed: {error}");
                    }
                    None => tracing::warn!(%id, "request failed: {error}"),
                }
                Err(error)
            }
        }
    }
}

/// Returns a bounded, ordered view of response headers for trace logging.
fn truncated_headers(response: &HttpResponse) -> Vec<String> {
    let mut entries: Vec<String> = response
        .headers
        .iter()
        .map(|(name, values)| format!("{name}: {}", values.first().map_or("", String::as_str)))
        .collect();
    entries.sort_unstable();
    entries.truncate(HEADER_LOG_LIMIT);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_correlation_id_has_fixed_length() {
        for _ in 0..32 {
            let id = correlation_id();
            assert_eq!(id.len(), CORRELATION_ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_correlation_ids_are_distinct_per_call() {
        let ids: std::collections::HashSet<String> = (0..64).map(|_| correlation_id()).collect();
        // With 62^5 possibilities, 64 draws colliding would indicate a
        // broken generator rather than bad luck
        assert!(ids.len() > 60);
    }

    #[test]
    fn test_truncated_headers_is_bounded_and_sorted() {
        let mut headers = HashMap::new();
        for i in 0..20 {
            headers.insert(format!("x-header-{i:02}"), vec![format!("value-{i}")]);
        }
        let response = crate::clients::HttpResponse::new(200, headers, json!({}));

        let entries = truncated_headers(&response);
        assert_eq!(entries.len(), HEADER_LOG_LIMIT);
        let mut sorted = entries.clone();
        sorted.sort_unstable();
        assert_eq!(entries, sorted);
    }
}
