use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    cache::{RateLimitDecision, RateLimiter},
    config::RateLimitFailurePolicy,
    error::AppError,
};

/// 限流中间件状态
pub struct RateLimitGuard {
    limiter: RateLimiter,
    on_store_error: RateLimitFailurePolicy,
}

/// 取客户端标识：优先 x-real-ip，其次 x-forwarded-for 的第一个地址，最后是连接地址
pub fn client_identifier(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let peer_ip = peer.map(|addr| addr.ip().to_string());

    headers
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').map(str::trim).find(|ip| !ip.is_empty()))
        })
        .or(peer_ip.as_deref())
        .unwrap_or("unknown")
        .to_string()
}

fn apply_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert("x-ratelimit-reset", HeaderValue::from(decision.reset_seconds));
}

impl RateLimitGuard {
    pub fn new(limiter: RateLimiter, on_store_error: RateLimitFailurePolicy) -> Self {
        Self {
            limiter,
            on_store_error,
        }
    }

    pub async fn check_rate_limit(self: Arc<Self>, req: Request<Body>, next: Next) -> Response {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0);
        let ip = client_identifier(req.headers(), peer);

        let decision = match self.limiter.check(&ip).await {
            Ok(decision) => decision,
            Err(e) => {
                return match self.on_store_error {
                    RateLimitFailurePolicy::FailOpen => {
                        tracing::warn!("Rate limit store failed, allowing {}: {}", ip, e);
                        next.run(req).await
                    }
                    RateLimitFailurePolicy::FailClosed => {
                        tracing::warn!("Rate limit store failed, rejecting {}: {}", ip, e);
                        AppError::StoreUnavailable("rate limiter unavailable".to_string())
                            .into_response()
                    }
                };
            }
        };

        if !decision.allowed {
            tracing::info!("Rate limited {}", ip);
            let mut response = AppError::RateLimited {
                retry_after: decision.reset_seconds,
            }
            .into_response();
            apply_headers(response.headers_mut(), &decision);
            response
                .headers_mut()
                .insert("retry-after", HeaderValue::from(decision.reset_seconds));
            return response;
        }

        let mut response = next.run(req).await;
        apply_headers(response.headers_mut(), &decision);
        response
    }
}

pub async fn rate_limit(
    State(guard): State<Arc<RateLimitGuard>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    guard.check_rate_limit(req, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn real_ip_wins() {
        let h = headers(&[("x-real-ip", "203.0.113.9"), ("x-forwarded-for", "10.0.0.1")]);
        assert_eq!(client_identifier(&h, None), "203.0.113.9");
    }

    #[test]
    fn first_forwarded_address_is_used() {
        let h = headers(&[("x-forwarded-for", " , 198.51.100.4, 10.0.0.1")]);
        assert_eq!(client_identifier(&h, None), "198.51.100.4");
    }

    #[test]
    fn falls_back_to_peer_then_unknown() {
        let peer: SocketAddr = "192.0.2.1:5555".parse().unwrap();
        assert_eq!(client_identifier(&HeaderMap::new(), Some(peer)), "192.0.2.1");
        assert_eq!(client_identifier(&HeaderMap::new(), None), "unknown");
    }
}
