use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::AppState;

/// Ping响应
#[derive(Serialize)]
pub struct PingResponse {
    /// 服务状态
    pub status: String,
    /// 缓存后端
    pub cache_backend: &'static str,
    /// 服务器时间
    pub timestamp: i64,
}

/// 健康检查接口
pub async fn ping(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(PingResponse {
            status: "ok".to_string(),
            cache_backend: state.store.backend_name(),
            timestamp: chrono::Utc::now().timestamp(),
        }),
    )
}
