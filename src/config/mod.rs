//! Configuration types for the GitHub API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with GitHub.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GitHubConfig`]: The main configuration struct holding all SDK settings
//! - [`GitHubConfigBuilder`]: A builder for constructing [`GitHubConfig`] instances
//! - [`AccessToken`]: A validated access token newtype with masked debug output
//! - [`ApiBase`]: A validated API base URL
//! - [`ThrottleConfig`]: Optional rate/abuse limit handler overrides
//!
//! # Example
//!
//! ```rust
//! use github_api::{GitHubConfig, AccessToken, ApiBase};
//!
//! let config = GitHubConfig::builder()
//!     .token(AccessToken::new("ghp_example").unwrap())
//!     .base_url(ApiBase::new("https://ghe.example.com/api/v3").unwrap())
//!     .build();
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiBase};

use std::fmt;
use std::sync::Arc;

/// A rate/abuse limit handler.
///
/// Invoked with the suggested wait duration in seconds; returns `true` to
/// retry the request after waiting, `false` to abandon it.
pub type ThrottleHandler = Arc<dyn Fn(f64) -> bool + Send + Sync>;

/// Optional overrides for rate and abuse limit handling.
///
/// When a handler is not supplied, [`GitHubApi`](crate::GitHubApi) installs a
/// default at construction that logs a warning and unconditionally retries.
///
/// # Example
///
/// ```rust
/// use github_api::ThrottleConfig;
///
/// // Give up on abuse limits instead of waiting
/// let throttle = ThrottleConfig::new().on_abuse_limit(|_retry_after| false);
/// assert!(throttle.abuse_limit_handler().is_some());
/// assert!(throttle.rate_limit_handler().is_none());
/// ```
#[derive(Clone, Default)]
pub struct ThrottleConfig {
    on_rate_limit: Option<ThrottleHandler>,
    on_abuse_limit: Option<ThrottleHandler>,
}

impl ThrottleConfig {
    /// Creates an empty throttle configuration (defaults apply).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the handler invoked when a rate limit is hit.
    #[must_use]
    pub fn on_rate_limit(mut self, handler: impl Fn(f64) -> bool + Send + Sync + 'static) -> Self {
        self.on_rate_limit = Some(Arc::new(handler));
        self
    }

    /// Sets the handler invoked when an abuse limit is hit.
    #[must_use]
    pub fn on_abuse_limit(mut self, handler: impl Fn(f64) -> bool + Send + Sync + 'static) -> Self {
        self.on_abuse_limit = Some(Arc::new(handler));
        self
    }

    /// Returns the configured rate limit handler, if any.
    #[must_use]
    pub fn rate_limit_handler(&self) -> Option<&ThrottleHandler> {
        self.on_rate_limit.as_ref()
    }

    /// Returns the configured abuse limit handler, if any.
    #[must_use]
    pub fn abuse_limit_handler(&self) -> Option<&ThrottleHandler> {
        self.on_abuse_limit.as_ref()
    }
}

impl fmt::Debug for ThrottleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThrottleConfig")
            .field("on_rate_limit", &self.on_rate_limit.as_ref().map(|_| "<handler>"))
            .field("on_abuse_limit", &self.on_abuse_limit.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

/// Configuration for the GitHub API SDK.
///
/// This struct holds all configuration needed for SDK operations, including
/// the access token, API base URL, and throttle handler overrides.
///
/// # Thread Safety
///
/// `GitHubConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use github_api::{GitHubConfig, AccessToken};
///
/// let config = GitHubConfig::builder()
///     .token(AccessToken::new("ghp_example").unwrap())
///     .debug(true)
///     .build();
///
/// assert!(config.debug());
/// ```
#[derive(Clone, Debug)]
pub struct GitHubConfig {
    token: Option<AccessToken>,
    base_url: ApiBase,
    user_agent_prefix: Option<String>,
    debug: bool,
    throttle: ThrottleConfig,
}

impl GitHubConfig {
    /// Creates a new builder for constructing a `GitHubConfig`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use github_api::GitHubConfig;
    ///
    /// let config = GitHubConfig::builder().build();
    /// assert_eq!(config.base_url().as_ref(), "https://api.github.com");
    /// ```
    #[must_use]
    pub fn builder() -> GitHubConfigBuilder {
        GitHubConfigBuilder::new()
    }

    /// Returns the access token, if configured.
    ///
    /// Unauthenticated requests are legal against the public API, with
    /// sharply lower rate limits.
    #[must_use]
    pub const fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &ApiBase {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns whether verbose request logging is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the throttle handler overrides.
    #[must_use]
    pub const fn throttle(&self) -> &ThrottleConfig {
        &self.throttle
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// Verify GitHubConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GitHubConfig>();
};

/// Builder for constructing [`GitHubConfig`] instances.
///
/// This builder provides a fluent API for configuring the SDK. All fields
/// have sensible defaults; building never fails.
///
/// # Defaults
///
/// - `token`: `None` (unauthenticated)
/// - `base_url`: `https://api.github.com`
/// - `user_agent_prefix`: `None`
/// - `debug`: `false`
/// - `throttle`: no overrides (warn-and-retry defaults installed by the facade)
///
/// # Example
///
/// ```rust
/// use github_api::{GitHubConfig, AccessToken, ApiBase, ThrottleConfig};
///
/// let config = GitHubConfig::builder()
///     .token(AccessToken::new("ghp_example").unwrap())
///     .base_url(ApiBase::new("https://ghe.example.com/api/v3").unwrap())
///     .user_agent_prefix("my-bot/1.0")
///     .throttle(ThrottleConfig::new().on_rate_limit(|_| false))
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct GitHubConfigBuilder {
    token: Option<AccessToken>,
    base_url: Option<ApiBase>,
    user_agent_prefix: Option<String>,
    debug: Option<bool>,
    throttle: Option<ThrottleConfig>,
}

impl GitHubConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token.
    #[must_use]
    pub fn token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Sets the API base URL.
    ///
    /// For GitHub Enterprise, pass the installation's REST base
    /// (e.g., `https://ghe.example.com/api/v3`). The GraphQL endpoint is
    /// derived from this value.
    #[must_use]
    pub fn base_url(mut self, base_url: ApiBase) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the user agent prefix.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Enables verbose request logging.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Sets the throttle handler overrides.
    #[must_use]
    pub fn throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Builds the [`GitHubConfig`].
    #[must_use]
    pub fn build(self) -> GitHubConfig {
        GitHubConfig {
            token: self.token,
            base_url: self.base_url.unwrap_or_else(ApiBase::public),
            user_agent_prefix: self.user_agent_prefix,
            debug: self.debug.unwrap_or(false),
            throttle: self.throttle.unwrap_or_default(),
        }
    }
}
