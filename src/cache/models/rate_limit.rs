use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 固定窗口限流计数器
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RateLimitCounter {
    pub key: String,
    pub count: u64,
    pub window_seconds: u64,
    pub expires_at: DateTime<Utc>,
}

impl RateLimitCounter {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// 距窗口重置的剩余秒数，向上取整
    pub fn seconds_until_reset(&self, now: DateTime<Utc>) -> u64 {
        let millis = (self.expires_at - now).num_milliseconds();
        if millis <= 0 {
            0
        } else {
            (millis as u64).div_ceil(1000)
        }
    }
}

/// 一次限流检查的结果
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_seconds: u64,
}
