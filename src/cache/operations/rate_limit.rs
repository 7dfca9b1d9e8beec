use std::sync::Arc;

use crate::cache::keys::rate_limit_key;
use crate::cache::models::RateLimitDecision;
use crate::cache::store::CacheStore;
use crate::error::CacheError;

/// 固定窗口限流
///
/// 窗口到期后计数整体清零，窗口边界上允许突发，属于已知行为。
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn CacheStore>,
    limit: u32,
    window_seconds: u64,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CacheStore>, limit: u32, window_seconds: u64) -> Self {
        Self {
            store,
            limit,
            window_seconds,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window_seconds(&self) -> u64 {
        self.window_seconds
    }

    /// 计数加一并与上限比较
    ///
    /// 存储故障原样返回，由调用方按配置决定放行还是拒绝。
    pub async fn check(&self, identifier: &str) -> Result<RateLimitDecision, CacheError> {
        if identifier.trim().is_empty() {
            return Err(CacheError::InvalidArgument(
                "rate limit identifier must not be empty".into(),
            ));
        }

        let counter = self
            .store
            .increment_counter(&rate_limit_key(identifier), self.window_seconds)
            .await?;

        let limit = u64::from(self.limit);
        let allowed = counter.count <= limit;
        let remaining = limit.saturating_sub(counter.count) as u32;
        let reset_seconds = counter.seconds_until_reset(self.store.now());

        if !allowed {
            tracing::debug!(
                "Rate limit exceeded for {}: {} requests, resets in {}s",
                identifier,
                counter.count,
                reset_seconds
            );
        }

        Ok(RateLimitDecision {
            allowed,
            limit: self.limit,
            remaining,
            reset_seconds,
        })
    }
}
