mod fixtures;

use axum::http::StatusCode;
use fixtures::{DownApp, body_json, header};
use fixtures_backend::config::{Config, RateLimitFailurePolicy};

fn down(policy: RateLimitFailurePolicy) -> DownApp {
    DownApp::with_config(Config {
        rate_limit_on_store_error: policy,
        ..Config::default()
    })
}

#[tokio::test]
async fn fail_open_serves_fixtures_without_the_cache() {
    let app = down(RateLimitFailurePolicy::FailOpen);

    let response = app.get("/api/fixtures/league/4328").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-cache"), Some("BYPASS"));
    // 限流被跳过，不带限流头
    assert_eq!(header(&response, "x-ratelimit-limit"), None);
    assert_eq!(body_json(response).await["events"][0]["call"], 1);

    // 没有缓存可用，每次都回源
    app.get("/api/fixtures/league/4328").await;
    assert_eq!(app.origin.calls(), 2);
}

#[tokio::test]
async fn fail_closed_rejects_before_reaching_handlers() {
    let app = down(RateLimitFailurePolicy::FailClosed);

    let response = app.get("/api/fixtures/league/4328").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], 503);
    assert_eq!(app.origin.calls(), 0);

    let ping = app.get("/api/ping").await;
    assert_eq!(ping.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn cleanup_reports_store_failure() {
    for policy in [RateLimitFailurePolicy::FailOpen, RateLimitFailurePolicy::FailClosed] {
        let app = down(policy);
        let response = app.get("/api/cron/cleanup").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    let app = down(RateLimitFailurePolicy::FailOpen);
    let body = body_json(app.get("/api/cron/cleanup").await).await;
    assert_eq!(body["success"], false);
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|e| e.contains("connection refused"))
    );
    assert!(body["timestamp"].is_string());
}
