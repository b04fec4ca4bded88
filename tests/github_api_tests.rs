//! Integration tests for the assembled client.
//!
//! These tests verify facade construction, default throttle behavior, and
//! that the logging layer observes requests without altering their results.

use github_api::clients::{HttpClient, HttpMethod, HttpRequest, ThrottleHandlers};
use github_api::{AccessToken, ApiBase, GitHubApi, GitHubConfig, HttpError, ThrottleConfig};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_facade_request_returns_unaltered_response() {
    let server = MockServer::start().await;

    let body = json!({
        "login": "octocat",
        "id": 583231,
        "plan": {"name": "pro", "private_repos": 9999}
    });
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body.clone())
                .insert_header("X-GitHub-Request-Id", "FACADE:1"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = GitHubApi::new(
        GitHubConfig::builder()
            .base_url(ApiBase::new(server.uri()).unwrap())
            .token(AccessToken::new("ghp_test").unwrap())
            .debug(true)
            .build(),
    );

    let request = HttpRequest::builder(HttpMethod::Get, "user").build().unwrap();
    let response = api.request(request).await.unwrap();

    // The logging layer observes but never rewrites the response
    assert_eq!(response.code, 200);
    assert_eq!(response.body, body);
    assert_eq!(response.request_id(), Some("FACADE:1"));
}

#[tokio::test]
async fn test_facade_request_returns_unaltered_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = GitHubApi::new(
        GitHubConfig::builder()
            .base_url(ApiBase::new(server.uri()).unwrap())
            .build(),
    );

    let request = HttpRequest::builder(HttpMethod::Get, "missing").build().unwrap();
    let error = api.request(request).await.unwrap_err();

    match error {
        HttpError::Response(e) => {
            assert_eq!(e.code, 404);
            assert!(e.message.contains("Not Found"));
        }
        other => panic!("expected response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_default_throttle_policy_waits_and_retries() {
    let server = MockServer::start().await;

    // One rate-limited response with an immediate retry window, then success
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({"message": "API rate limit exceeded"}))
                .insert_header("X-RateLimit-Limit", "60")
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("Retry-After", "0"),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(1)
        .mount(&server)
        .await;

    // No throttle overrides: the default policy must recover transparently
    let api = GitHubApi::new(
        GitHubConfig::builder()
            .base_url(ApiBase::new(server.uri()).unwrap())
            .build(),
    );

    let request = HttpRequest::builder(HttpMethod::Get, "user").build().unwrap();
    let response = api.request(request).await.unwrap();

    assert_eq!(response.body["login"], json!("octocat"));
}

#[tokio::test]
async fn test_caller_throttle_override_is_honored() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"message": "You have exceeded a secondary rate limit"}))
                .insert_header("Retry-After", "120"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let calls = Arc::new(AtomicU32::new(0));
    let calls_seen = Arc::clone(&calls);
    let api = GitHubApi::new(
        GitHubConfig::builder()
            .base_url(ApiBase::new(server.uri()).unwrap())
            .throttle(ThrottleConfig::new().on_abuse_limit(move |retry_after| {
                calls_seen.fetch_add(1, Ordering::SeqCst);
                assert!((retry_after - 120.0).abs() < f64::EPSILON);
                false
            }))
            .build(),
    );

    let request = HttpRequest::builder(HttpMethod::Get, "user").build().unwrap();
    let error = api.request(request).await.unwrap_err();

    assert!(matches!(error, HttpError::Response(e) if e.code == 403));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_from_client_injects_prebuilt_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = GitHubConfig::builder()
        .base_url(ApiBase::new(server.uri()).unwrap())
        .build();
    let http = HttpClient::new(
        &config,
        ThrottleHandlers {
            on_rate_limit: Arc::new(|_| false),
            on_abuse_limit: Arc::new(|_| false),
        },
    );
    let api = GitHubApi::from_client(http, &config);

    let request = HttpRequest::builder(HttpMethod::Get, "user").build().unwrap();
    let response = api.request(request).await.unwrap();
    assert_eq!(response.body["login"], json!("octocat"));
}

#[tokio::test]
async fn test_independent_instances_do_not_share_state() {
    let server_one = MockServer::start().await;
    let server_two = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "first"})))
        .expect(1)
        .mount(&server_one)
        .await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "second"})))
        .expect(1)
        .mount(&server_two)
        .await;

    let api_one = GitHubApi::new(
        GitHubConfig::builder()
            .base_url(ApiBase::new(server_one.uri()).unwrap())
            .build(),
    );
    let api_two = GitHubApi::new(
        GitHubConfig::builder()
            .base_url(ApiBase::new(server_two.uri()).unwrap())
            .build(),
    );

    let request = HttpRequest::builder(HttpMethod::Get, "user").build().unwrap();
    let first = api_one.request(request.clone()).await.unwrap();
    let second = api_two.request(request).await.unwrap();

    assert_eq!(first.body["login"], json!("first"));
    assert_eq!(second.body["login"], json!("second"));
}
