use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;

#[derive(Debug, Serialize)]
pub struct CleanupStats {
    pub before: CacheStats,
    pub after: CacheStats,
}

/// 定时清理的响应体
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub removed: u64,
    pub stats: CleanupStats,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CleanupFailure {
    pub success: bool,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}
