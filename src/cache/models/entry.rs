use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// 缓存条目
///
/// `now - stored_at >= ttl_seconds` 时条目在逻辑上已过期，不能再作为新鲜数据返回，
/// 但可以继续保留，直到被覆盖或清理。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub value: serde_json::Value,
    pub stored_at: DateTime<Utc>,
    pub ttl_seconds: u64,
}

impl CacheEntry {
    pub fn new(key: &str, value: serde_json::Value, ttl_seconds: u64, now: DateTime<Utc>) -> Self {
        Self {
            key: key.to_string(),
            value,
            stored_at: now,
            ttl_seconds,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        TimeDelta::try_seconds(ttl)
            .and_then(|d| self.stored_at.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }

    pub fn into_lookup(self, now: DateTime<Utc>) -> CacheLookup {
        let fresh = self.is_fresh(now);
        CacheLookup {
            value: self.value,
            fresh,
            stored_at: self.stored_at,
            ttl_seconds: self.ttl_seconds,
        }
    }
}

/// `get` 命中时的结果
#[derive(Debug, Clone, PartialEq)]
pub struct CacheLookup {
    pub value: serde_json::Value,
    pub fresh: bool,
    pub stored_at: DateTime<Utc>,
    pub ttl_seconds: u64,
}

/// 近似的缓存统计快照
///
/// 数值可能滞后，Redis 后端不统计占用字节数。
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approx_bytes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn freshness_boundary_is_exclusive() {
        let t0 = Utc::now();
        let entry = CacheEntry::new("fixtures-1", json!({"events": []}), 900, t0);

        assert!(entry.is_fresh(t0));
        assert!(entry.is_fresh(t0 + TimeDelta::seconds(899)));
        assert!(!entry.is_fresh(t0 + TimeDelta::seconds(900)));
        assert!(!entry.is_fresh(t0 + TimeDelta::seconds(901)));
    }

    #[test]
    fn huge_ttl_does_not_overflow() {
        let entry = CacheEntry::new("k", json!(1), u64::MAX, Utc::now());
        assert!(entry.is_fresh(Utc::now()));
    }
}
