use axum::{
    body::{Body, HttpBody, to_bytes},
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;

/// 记录响应体的最大字节数
const MAX_LOGGED_BODY: usize = 64 * 1024;

pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    // 过大或长度未知的响应体原样返回，只记录状态
    let within_limit = response
        .body()
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_LOGGED_BODY as u64);
    if !within_limit {
        error!(
            "Server error - {} {} - Status: {}, Body: <not logged, larger than {} bytes>",
            method,
            uri,
            response.status(),
            MAX_LOGGED_BODY
        );
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to read error response body for {} {}: {}", method, uri, e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    error!(
        "Server error - {} {} - Status: {}, Body: {}",
        method,
        uri,
        parts.status,
        String::from_utf8_lossy(&bytes)
    );

    // 重新构建响应体
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
