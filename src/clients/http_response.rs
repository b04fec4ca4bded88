//! HTTP response types for the GitHub API SDK.
//!
//! This module provides the [`HttpResponse`] type and related types for
//! parsing and accessing API response data, including the pagination,
//! rate limit, and throttle signals GitHub carries in response headers.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};

/// Rate limit information parsed from the `X-RateLimit-*` headers.
///
/// GitHub reports the bucket size, the remaining allowance, and the epoch
/// second at which the allowance resets.
///
/// # Example
///
/// ```rust
/// use github_api::clients::RateLimit;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ratelimit-limit".to_string(), vec!["5000".to_string()]);
/// headers.insert("x-ratelimit-remaining".to_string(), vec!["4987".to_string()]);
/// headers.insert("x-ratelimit-reset".to_string(), vec!["1700000000".to_string()]);
///
/// let limit = RateLimit::parse(&headers).unwrap();
/// assert_eq!(limit.limit, 5000);
/// assert_eq!(limit.remaining, 4987);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimit {
    /// The maximum number of requests permitted in the current window.
    pub limit: u32,
    /// The number of requests remaining in the current window.
    pub remaining: u32,
    /// When the current window resets.
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Parses rate limit information from response headers.
    ///
    /// Returns `None` unless both `x-ratelimit-limit` and
    /// `x-ratelimit-remaining` are present and numeric.
    #[must_use]
    pub fn parse(headers: &HashMap<String, Vec<String>>) -> Option<Self> {
        let first = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .map(String::as_str)
        };

        let limit = first("x-ratelimit-limit")?.parse().ok()?;
        let remaining = first("x-ratelimit-remaining")?.parse().ok()?;
        let reset = first("x-ratelimit-reset")
            .and_then(|value| value.parse::<i64>().ok())
            .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single());

        Some(Self {
            limit,
            remaining,
            reset,
        })
    }

    /// Returns the number of seconds until the window resets, relative to
    /// `now`, clamped to zero. Returns `None` when no reset time was sent.
    #[must_use]
    pub fn seconds_until_reset(&self, now: DateTime<Utc>) -> Option<f64> {
        let reset = self.reset?;
        let delta = (reset - now).num_seconds();
        #[allow(clippy::cast_precision_loss)]
        Some(delta.max(0) as f64)
    }
}

/// Pagination URLs parsed from the `Link` header.
///
/// GitHub uses absolute URLs with `rel` attributes; the `next` URL is
/// followed by [`paginate`](crate::GitHubApi::paginate) until absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// The URL of the previous page, if available.
    pub prev: Option<String>,
    /// The URL of the next page, if available.
    pub next: Option<String>,
}

impl PageLinks {
    /// Parses pagination links from a `Link` header value.
    ///
    /// The header format is:
    /// `<url>; rel="next", <url>; rel="prev"`
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> Self {
        let mut result = Self::default();

        for link in header_value.split(',') {
            let link = link.trim();

            // Extract rel type
            let rel = link.split(';').find_map(|part| {
                let part = part.trim();
                part.strip_prefix("rel=").map(|rel| rel.trim_matches('"'))
            });

            // Extract URL
            let url = link
                .split(';')
                .next()
                .map(|s| s.trim().trim_start_matches('<').trim_end_matches('>'));

            if let (Some(rel), Some(url)) = (rel, url) {
                match rel {
                    "prev" | "previous" => result.prev = Some(url.to_string()),
                    "next" => result.next = Some(url.to_string()),
                    _ => {}
                }
            }
        }

        result
    }
}

/// The kind of limit a throttle event reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleKind {
    /// The primary request quota was exhausted.
    RateLimit,
    /// A secondary (abuse detection) limit was triggered.
    AbuseLimit,
}

/// A recoverable throttling signal extracted from a 403 or 429 response.
///
/// Throttle events are not errors: they are handed to the configured
/// rate/abuse limit handler, which decides whether the request is retried
/// after waiting or abandoned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrottleEvent {
    /// Which limit was hit.
    pub kind: ThrottleKind,
    /// Suggested wait in seconds before retrying.
    pub retry_after: f64,
}

impl ThrottleEvent {
    /// Default wait when the response suggests none.
    const DEFAULT_RETRY_AFTER: f64 = 1.0;

    /// Classifies a response as a throttle event, if it is one.
    ///
    /// A 403/429 response with an exhausted `x-ratelimit-remaining` is a
    /// rate limit; the wait comes from `Retry-After`, else from
    /// `x-ratelimit-reset`. A 403/429 with a `Retry-After` header but a
    /// non-exhausted quota is an abuse (secondary) limit. A bare 429 is
    /// treated as a rate limit with the default wait. Anything else,
    /// including an ordinary 403 Forbidden, is not a throttle event.
    #[must_use]
    pub fn classify(response: &HttpResponse, now: DateTime<Utc>) -> Option<Self> {
        if response.code != 403 && response.code != 429 {
            return None;
        }

        let quota_exhausted = response
            .rate_limit
            .is_some_and(|limit| limit.remaining == 0);

        if quota_exhausted {
            let retry_after = response
                .retry_request_after
                .or_else(|| {
                    response
                        .rate_limit
                        .and_then(|limit| limit.seconds_until_reset(now))
                })
                .unwrap_or(Self::DEFAULT_RETRY_AFTER);
            return Some(Self {
                kind: ThrottleKind::RateLimit,
                retry_after,
            });
        }

        if let Some(retry_after) = response.retry_request_after {
            return Some(Self {
                kind: ThrottleKind::AbuseLimit,
                retry_after,
            });
        }

        if response.code == 429 {
            return Some(Self {
                kind: ThrottleKind::RateLimit,
                retry_after: Self::DEFAULT_RETRY_AFTER,
            });
        }

        None
    }
}

/// An HTTP response from the GitHub API.
///
/// Contains the response status code, headers, body, and parsed
/// GitHub-specific header values like rate limits and pagination links.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Pagination URLs (from the `Link` header).
    pub links: PageLinks,
    /// Rate limit information (from the `X-RateLimit-*` headers).
    pub rate_limit: Option<RateLimit>,
    /// Seconds to wait before retrying (from the `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse` with automatic header parsing.
    ///
    /// This constructor parses GitHub-specific headers automatically:
    /// - `Link` -> `links`
    /// - `X-RateLimit-Limit` / `-Remaining` / `-Reset` -> `rate_limit`
    /// - `Retry-After` -> `retry_request_after`
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let links = headers
            .get("link")
            .and_then(|values| values.first())
            .map_or_else(PageLinks::default, |link| {
                PageLinks::parse_link_header(link)
            });

        let rate_limit = RateLimit::parse(&headers);

        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            links,
            rate_limit,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-GitHub-Request-Id` header value, if present.
    ///
    /// This ID is useful for debugging and should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-github-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Sunset` header value, if present.
    ///
    /// GitHub announces endpoint retirement with `Deprecation`/`Sunset`
    /// headers; the client logs a warning when one is seen.
    #[must_use]
    pub fn sunset(&self) -> Option<&str> {
        self.headers
            .get("sunset")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the URL of the next page, if the server reported one.
    #[must_use]
    pub fn next_page_url(&self) -> Option<&str> {
        self.links.next.as_deref()
    }

    /// Returns the URL of the previous page, if the server reported one.
    #[must_use]
    pub fn prev_page_url(&self) -> Option<&str> {
        self.links.prev.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn headers_with(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(
                response.is_ok(),
                "Expected is_ok() to be true for code {code}"
            );
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 403, 404, 429, 500, 502] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!response.is_ok());
        }
    }

    #[test]
    fn test_rate_limit_parsing() {
        let headers = headers_with(&[
            ("x-ratelimit-limit", "5000"),
            ("x-ratelimit-remaining", "4987"),
            ("x-ratelimit-reset", "1700000000"),
        ]);

        let limit = RateLimit::parse(&headers).unwrap();
        assert_eq!(limit.limit, 5000);
        assert_eq!(limit.remaining, 4987);
        assert_eq!(
            limit.reset,
            Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
        );
    }

    #[test]
    fn test_rate_limit_parsing_requires_core_headers() {
        assert!(RateLimit::parse(&HashMap::new()).is_none());

        let only_limit = headers_with(&[("x-ratelimit-limit", "5000")]);
        assert!(RateLimit::parse(&only_limit).is_none());

        let garbage = headers_with(&[
            ("x-ratelimit-limit", "many"),
            ("x-ratelimit-remaining", "0"),
        ]);
        assert!(RateLimit::parse(&garbage).is_none());
    }

    #[test]
    fn test_seconds_until_reset_clamps_to_zero() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let limit = RateLimit {
            limit: 5000,
            remaining: 0,
            reset: Some(now + Duration::seconds(90)),
        };
        assert!((limit.seconds_until_reset(now).unwrap() - 90.0).abs() < f64::EPSILON);

        let past = RateLimit {
            limit: 5000,
            remaining: 0,
            reset: Some(now - Duration::seconds(90)),
        };
        assert!((past.seconds_until_reset(now).unwrap() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_link_header_parsing() {
        // Both prev and next
        let link = r#"<https://api.github.com/repositories/1/issues?page=3>; rel="next", <https://api.github.com/repositories/1/issues?page=1>; rel="prev""#;
        let links = PageLinks::parse_link_header(link);
        assert_eq!(
            links.next.as_deref(),
            Some("https://api.github.com/repositories/1/issues?page=3")
        );
        assert_eq!(
            links.prev.as_deref(),
            Some("https://api.github.com/repositories/1/issues?page=1")
        );

        // Only next, with first/last ignored
        let link = r#"<https://api.github.com/repositories/1/issues?page=2>; rel="next", <https://api.github.com/repositories/1/issues?page=10>; rel="last""#;
        let links = PageLinks::parse_link_header(link);
        assert_eq!(
            links.next.as_deref(),
            Some("https://api.github.com/repositories/1/issues?page=2")
        );
        assert!(links.prev.is_none());

        // "previous" spelling is accepted too
        let link = r#"<https://api.github.com/repositories/1/issues?page=1>; rel="previous""#;
        let links = PageLinks::parse_link_header(link);
        assert!(links.next.is_none());
        assert!(links.prev.is_some());
    }

    #[test]
    fn test_retry_after_parsing() {
        let headers = headers_with(&[("retry-after", "2.5")]);
        let response = HttpResponse::new(429, headers, json!({}));
        assert!((response.retry_request_after.unwrap() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_request_id_extraction() {
        let headers = headers_with(&[("x-github-request-id", "AB12:3456:789")]);
        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.request_id(), Some("AB12:3456:789"));
    }

    #[test]
    fn test_sunset_extraction() {
        let headers = headers_with(&[("sunset", "Sat, 01 Nov 2026 00:00:00 GMT")]);
        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.sunset(), Some("Sat, 01 Nov 2026 00:00:00 GMT"));

        let response = HttpResponse::new(200, HashMap::new(), json!({}));
        assert!(response.sunset().is_none());
    }

    #[test]
    fn test_classify_rate_limit_from_exhausted_quota() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let headers = headers_with(&[
            ("x-ratelimit-limit", "60"),
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "1700000042"),
        ]);
        let response = HttpResponse::new(403, headers, json!({}));

        let event = ThrottleEvent::classify(&response, now).unwrap();
        assert_eq!(event.kind, ThrottleKind::RateLimit);
        assert!((event.retry_after - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classify_prefers_retry_after_header_for_rate_limit() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let headers = headers_with(&[
            ("x-ratelimit-limit", "60"),
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "1700000100"),
            ("retry-after", "7"),
        ]);
        let response = HttpResponse::new(429, headers, json!({}));

        let event = ThrottleEvent::classify(&response, now).unwrap();
        assert_eq!(event.kind, ThrottleKind::RateLimit);
        assert!((event.retry_after - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classify_abuse_limit_from_retry_after() {
        let now = Utc::now();
        let headers = headers_with(&[
            ("x-ratelimit-limit", "5000"),
            ("x-ratelimit-remaining", "4000"),
            ("retry-after", "30"),
        ]);
        let response = HttpResponse::new(403, headers, json!({}));

        let event = ThrottleEvent::classify(&response, now).unwrap();
        assert_eq!(event.kind, ThrottleKind::AbuseLimit);
        assert!((event.retry_after - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classify_bare_429_defaults_to_rate_limit() {
        let response = HttpResponse::new(429, HashMap::new(), json!({}));
        let event = ThrottleEvent::classify(&response, Utc::now()).unwrap();
        assert_eq!(event.kind, ThrottleKind::RateLimit);
        assert!((event.retry_after - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classify_ignores_plain_forbidden_and_other_statuses() {
        let forbidden = HttpResponse::new(403, HashMap::new(), json!({}));
        assert!(ThrottleEvent::classify(&forbidden, Utc::now()).is_none());

        let not_found = HttpResponse::new(404, HashMap::new(), json!({}));
        assert!(ThrottleEvent::classify(&not_found, Utc::now()).is_none());

        // 403 with quota left and no Retry-After is an authorization failure
        let headers = headers_with(&[
            ("x-ratelimit-limit", "5000"),
            ("x-ratelimit-remaining", "4999"),
        ]);
        let authz = HttpResponse::new(403, headers, json!({}));
        assert!(ThrottleEvent::classify(&authz, Utc::now()).is_none());
    }
}
