use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::AppState;
use crate::cache::{CacheStore, keys::STALE_PATTERN};
use crate::error::CacheError;

use super::model::{CleanupFailure, CleanupResponse, CleanupStats};

async fn run_cleanup(store: &dyn CacheStore) -> Result<CleanupResponse, CacheError> {
    let before = store.stats().await?;
    let removed = store.invalidate_by_pattern(STALE_PATTERN).await?;
    let after = store.stats().await?;

    Ok(CleanupResponse {
        success: true,
        removed,
        stats: CleanupStats { before, after },
        timestamp: Utc::now(),
    })
}

/// 定时任务：清理匹配 `*:stale:*` 的键并报告前后统计
#[axum::debug_handler]
pub async fn cleanup(State(state): State<AppState>) -> Response {
    match run_cleanup(state.store.as_ref()).await {
        Ok(report) => {
            tracing::info!(
                "Cache cleanup removed {} keys ({} -> {} entries)",
                report.removed,
                report.stats.before.entries,
                report.stats.after.entries
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            tracing::error!("Cache cleanup failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(CleanupFailure {
                    success: false,
                    error: e.to_string(),
                    timestamp: Utc::now(),
                }),
            )
                .into_response()
        }
    }
}
