//! HTTP client for GitHub API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the GitHub API with automatic throttle and retry handling.

use std::collections::HashMap;
use std::fmt;

use chrono::Utc;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{HttpResponse, ThrottleEvent, ThrottleKind};
use crate::config::{GitHubConfig, ThrottleHandler};

/// Fixed retry wait time in seconds for server errors.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolved rate/abuse limit handlers consumed by [`HttpClient`].
///
/// Unlike [`ThrottleConfig`](crate::ThrottleConfig), both slots are always
/// populated; [`GitHubApi`](crate::GitHubApi) fills any missing slot with a
/// default that logs a warning and retries.
#[derive(Clone)]
pub struct ThrottleHandlers {
    /// Invoked when the primary request quota is exhausted.
    pub on_rate_limit: ThrottleHandler,
    /// Invoked when a secondary (abuse detection) limit is triggered.
    pub on_abuse_limit: ThrottleHandler,
}

impl fmt::Debug for ThrottleHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThrottleHandlers")
            .field("on_rate_limit", &"<handler>")
            .field("on_abuse_limit", &"<handler>")
            .finish()
    }
}

/// HTTP client for making requests to the GitHub API.
///
/// The client handles:
/// - URL construction from the configured base URL (or absolute targets)
/// - Default headers including User-Agent and the access token
/// - Throttle-handler-driven backoff for rate and abuse limits
/// - Automatic retry logic for 500 responses
/// - GitHub-specific header parsing
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use github_api::{GitHubConfig, AccessToken};
/// use github_api::clients::{HttpClient, HttpRequest, HttpMethod, ThrottleHandlers};
///
/// let config = GitHubConfig::builder()
///     .token(AccessToken::new("ghp_example").unwrap())
///     .build();
///
/// let client = HttpClient::new(&config, handlers);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "user/repos")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL (e.g., `https://api.github.com`).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Resolved throttle handlers.
    throttle: ThrottleHandlers,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration providing the base URL, token, and user agent
    /// * `throttle` - Resolved rate/abuse limit handlers
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &GitHubConfig, throttle: ThrottleHandlers) -> Self {
        let base_url = config.base_url().as_ref().to_string();

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}GitHub API Library v{SDK_VERSION} | Rust {rust_version}");

        // Build default headers
        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert(
            "Accept".to_string(),
            "application/vnd.github.v3+json".to_string(),
        );

        // Add authorization header if a token is configured
        if let Some(token) = config.token() {
            default_headers.insert(
                "Authorization".to_string(),
                format!("token {}", token.as_ref()),
            );
        }

        // Create reqwest client
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            default_headers,
            throttle,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the GitHub API.
    ///
    /// This method handles:
    /// - Request validation
    /// - URL construction (relative join or absolute pass-through)
    /// - Header merging
    /// - Response parsing
    /// - Throttle-handler-driven backoff for 403/429 throttle responses
    /// - Retry logic for 500 responses, up to the request's `tries` budget
    /// - Sunset (endpoint retirement) warning logging
    ///
    /// Rate and abuse limit retries are decided entirely by the configured
    /// handlers and do not consume the `tries` budget.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        // Validate request first
        request.verify()?;

        // Build full URL; pagination follows absolute Link URLs as-is
        let url = if request.is_absolute() {
            request.path.clone()
        } else {
            format!("{}/{}", self.base_url, request.path.trim_start_matches('/'))
        };

        // Merge headers
        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        // Retry loop; server_error_tries counts 500 attempts only
        let mut server_error_tries: u32 = 0;
        loop {
            // Build the reqwest request
            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Patch => self.client.patch(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            // Add headers
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            // Add query params
            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }

            // Add body
            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            // Send request
            let res = req_builder.send().await?;

            // Parse response
            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            // Parse body as JSON
            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text).unwrap_or_else(|_| {
                    // For 5xx errors, return raw body as string value
                    if code >= 500 {
                        serde_json::json!({ "raw_body": body_text })
                    } else {
                        serde_json::json!({})
                    }
                })
            };

            let response = HttpResponse::new(code, res_headers, body);

            // Log retirement warning if present
            if let Some(sunset) = response.sunset() {
                tracing::warn!(
                    "Request to GitHub API at {} hit an endpoint sunsetting on {}",
                    request.path,
                    sunset
                );
            }

            // Check if response is OK
            if response.is_ok() {
                return Ok(response);
            }

            // Build error message
            let error_message = Self::serialize_error(&response);

            // Throttle responses are handed to the configured handler, which
            // decides retry-or-abort; this path never consumes `tries`
            if let Some(event) = ThrottleEvent::classify(&response, Utc::now()) {
                let should_retry = match event.kind {
                    ThrottleKind::RateLimit => (self.throttle.on_rate_limit)(event.retry_after),
                    ThrottleKind::AbuseLimit => (self.throttle.on_abuse_limit)(event.retry_after),
                };
                if should_retry {
                    tokio::time::sleep(std::time::Duration::from_secs_f64(
                        event.retry_after.max(0.0),
                    ))
                    .await;
                    continue;
                }
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            // Check if we should retry a server error
            let should_retry = code == 500;
            if !should_retry {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            // Check if we've exhausted retries
            server_error_tries += 1;
            if server_error_tries >= request.tries {
                if request.tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: error_message,
                        error_reference: response.request_id().map(String::from),
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            tokio::time::sleep(std::time::Duration::from_secs(RETRY_WAIT_TIME)).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Serializes error response to JSON format.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(message) = response.body.get("message") {
            error_body.insert("message".to_string(), message.clone());
        }
        if let Some(errors) = response.body.get("errors") {
            error_body.insert("errors".to_string(), errors.clone());
        }
        if let Some(url) = response.body.get("documentation_url") {
            error_body.insert("documentation_url".to_string(), url.clone());
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessToken;
    use std::sync::Arc;

    fn reject_all_handlers() -> ThrottleHandlers {
        ThrottleHandlers {
            on_rate_limit: Arc::new(|_| false),
            on_abuse_limit: Arc::new(|_| false),
        }
    }

    fn create_test_config() -> GitHubConfig {
        GitHubConfig::builder()
            .token(AccessToken::new("ghp_test_token").unwrap())
            .build()
    }

    #[test]
    fn test_client_construction_with_config() {
        let config = create_test_config();
        let client = HttpClient::new(&config, reject_all_handlers());

        assert_eq!(client.base_url(), "https://api.github.com");
    }

    #[test]
    fn test_user_agent_header_format() {
        let config = create_test_config();
        let client = HttpClient::new(&config, reject_all_handlers());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("GitHub API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_authorization_header_injection() {
        let config = create_test_config();
        let client = HttpClient::new(&config, reject_all_handlers());

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"token ghp_test_token".to_string())
        );
    }

    #[test]
    fn test_no_authorization_header_when_unauthenticated() {
        let config = GitHubConfig::builder().build();
        let client = HttpClient::new(&config, reject_all_handlers());

        assert!(client.default_headers().get("Authorization").is_none());
    }

    #[test]
    fn test_accept_header_is_github_v3() {
        let config = create_test_config();
        let client = HttpClient::new(&config, reject_all_handlers());

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/vnd.github.v3+json".to_string())
        );
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = GitHubConfig::builder()
            .user_agent_prefix("my-bot/1.0")
            .build();
        let client = HttpClient::new(&config, reject_all_handlers());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("my-bot/1.0 | "));
        assert!(user_agent.contains("GitHub API Library"));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
