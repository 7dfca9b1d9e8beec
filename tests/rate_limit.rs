mod fixtures;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use fixtures::{TestApp, header};
use fixtures_backend::config::Config;

fn small_limit() -> TestApp {
    TestApp::with_config(Config {
        rate_limit_requests: 3,
        rate_limit_window_secs: 60,
        ..Config::default()
    })
}

async fn ping_from(app: &TestApp, ip: &str) -> axum::http::Response<Body> {
    app.send(
        Request::get("/api/ping")
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn requests_over_the_limit_get_429() {
    let app = small_limit();

    for expected_remaining in ["2", "1", "0"] {
        let response = ping_from(&app, "203.0.113.10").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header(&response, "x-ratelimit-limit"), Some("3"));
        assert_eq!(
            header(&response, "x-ratelimit-remaining"),
            Some(expected_remaining)
        );
    }

    let denied = ping_from(&app, "203.0.113.10").await;
    assert_eq!(denied.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(header(&denied, "x-ratelimit-remaining"), Some("0"));
    assert_eq!(header(&denied, "retry-after"), Some("60"));

    // 其他客户端不受影响
    let other = ping_from(&app, "198.51.100.20").await;
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn window_rollover_restores_the_budget() {
    let app = small_limit();
    for _ in 0..4 {
        ping_from(&app, "203.0.113.11").await;
    }

    app.clock.advance_secs(60);
    let response = ping_from(&app, "203.0.113.11").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-ratelimit-remaining"), Some("2"));
}
