use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::services::FixtureService;
use crate::upstream::OriginRequest;

/// 经缓存读取上游数据
///
/// 上游失败时返回对应的空结构和 502，不向客户端暴露异常。
pub(crate) async fn proxy(service: &FixtureService, request: OriginRequest) -> Response {
    match service.fetch(&request).await {
        Ok(fetched) => (
            StatusCode::OK,
            [("x-cache", fetched.cache.as_str())],
            Json(fetched.body),
        )
            .into_response(),
        Err(_) => (StatusCode::BAD_GATEWAY, Json(request.empty_body())).into_response(),
    }
}

/// 参数非法时同样返回空结构，状态码为 400
pub(crate) fn invalid(request: &OriginRequest, reason: &str) -> Response {
    tracing::debug!("Rejected {:?}: {}", request, reason);
    (StatusCode::BAD_REQUEST, Json(request.empty_body())).into_response()
}

/// 上游 ID 均为数字
pub(crate) fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 16 && id.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_short_numbers() {
        assert!(is_valid_id("4328"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("43a8"));
        assert!(!is_valid_id("*"));
        assert!(!is_valid_id("12345678901234567"));
    }
}
