use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::cache::models::{CacheLookup, CacheStats, RateLimitCounter};
use crate::error::CacheError;

/// 旁路缓存存储
///
/// 存储只负责读写，回源由调用方完成。所有修改只保证单键原子性，
/// 同一个键并发写入以最后完成者为准。
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 读取缓存
    ///
    /// 键不存在时返回 `None`；过期但尚未清理的条目以 `fresh = false` 返回。
    async fn get(&self, key: &str) -> Result<Option<CacheLookup>, CacheError>;

    /// 写入或覆盖缓存，重置写入时间
    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl_seconds: u64,
    ) -> Result<(), CacheError>;

    /// 删除所有匹配 glob 模式的键，返回删除数量
    async fn invalidate_by_pattern(&self, pattern: &str) -> Result<u64, CacheError>;

    /// 近似统计
    async fn stats(&self) -> Result<CacheStats, CacheError>;

    /// 固定窗口计数加一
    ///
    /// 计数器不存在或窗口已过期时从 1 开始，并以 `window_seconds` 作为新窗口长度。
    async fn increment_counter(
        &self,
        key: &str,
        window_seconds: u64,
    ) -> Result<RateLimitCounter, CacheError>;

    /// 存储使用的当前时间
    fn now(&self) -> DateTime<Utc>;

    fn backend_name(&self) -> &'static str;
}

pub(crate) fn validate_key(key: &str) -> Result<(), CacheError> {
    if key.trim().is_empty() {
        return Err(CacheError::InvalidArgument("key must not be empty".into()));
    }
    if key.chars().any(char::is_control) {
        return Err(CacheError::InvalidArgument(format!(
            "key {:?} contains control characters",
            key
        )));
    }
    Ok(())
}

pub(crate) fn validate_ttl(ttl_seconds: u64) -> Result<(), CacheError> {
    if ttl_seconds == 0 {
        return Err(CacheError::InvalidArgument("ttl must be positive".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_keys_and_zero_ttl() {
        assert!(validate_key("").is_err());
        assert!(validate_key("   ").is_err());
        assert!(validate_key("fixtures-\n1").is_err());
        assert!(validate_key("fixtures-4328").is_ok());
        assert!(validate_ttl(0).is_err());
        assert!(validate_ttl(1).is_ok());
    }
}
