use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::models::{CacheEntry, CacheLookup, CacheStats, RateLimitCounter};
use crate::cache::pattern::GlobPattern;
use crate::cache::store::{CacheStore, validate_key, validate_ttl};
use crate::error::CacheError;

/// 同一个键空间里既有缓存条目也有限流计数器，和 Redis 一致
#[derive(Debug, Clone)]
enum Slot {
    Entry(CacheEntry),
    Counter(RateLimitCounter),
}

impl Slot {
    fn approx_bytes(&self) -> u64 {
        match self {
            Slot::Entry(entry) => serde_json::to_vec(&entry.value)
                .map(|v| v.len() as u64)
                .unwrap_or(0),
            Slot::Counter(_) => std::mem::size_of::<u64>() as u64,
        }
    }
}

/// 进程内缓存
///
/// 过期采用惰性策略：读取时判断新鲜度，不做后台清扫。
pub struct MemoryStore {
    slots: RwLock<HashMap<String, Slot>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<CacheLookup>, CacheError> {
        validate_key(key)?;
        let now = self.clock.now();
        let slots = self.slots.read().await;

        match slots.get(key) {
            Some(Slot::Entry(entry)) => Ok(Some(entry.clone().into_lookup(now))),
            Some(Slot::Counter(counter)) if counter.is_expired(now) => Ok(None),
            Some(Slot::Counter(_)) => Err(CacheError::Serialization(format!(
                "key {} holds a rate-limit counter",
                key
            ))),
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        value: serde_json::Value,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        validate_key(key)?;
        validate_ttl(ttl_seconds)?;

        let entry = CacheEntry::new(key, value, ttl_seconds, self.clock.now());
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), Slot::Entry(entry));
        Ok(())
    }

    async fn invalidate_by_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let glob = GlobPattern::parse(pattern)?;
        let mut slots = self.slots.write().await;
        sweep_expired_counters(&mut slots, self.clock.now());

        let before = slots.len();
        slots.retain(|key, _| !glob.matches(key));
        let removed = (before - slots.len()) as u64;

        tracing::debug!("Invalidated {} keys matching {}", removed, glob.as_str());
        Ok(removed)
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        let now = self.clock.now();
        let slots = self.slots.read().await;
        let live: Vec<_> = slots
            .iter()
            .filter(|(_, slot)| !matches!(slot, Slot::Counter(c) if c.is_expired(now)))
            .collect();
        let bytes = live
            .iter()
            .map(|(key, slot)| key.len() as u64 + slot.approx_bytes())
            .sum();

        Ok(CacheStats {
            entries: live.len() as u64,
            approx_bytes: Some(bytes),
        })
    }

    async fn increment_counter(
        &self,
        key: &str,
        window_seconds: u64,
    ) -> Result<RateLimitCounter, CacheError> {
        validate_key(key)?;
        validate_ttl(window_seconds)?;

        let now = self.clock.now();
        let mut slots = self.slots.write().await;
        sweep_expired_counters(&mut slots, now);

        let counter = match slots.get(key) {
            Some(Slot::Counter(existing)) => RateLimitCounter {
                count: existing.count + 1,
                ..existing.clone()
            },
            Some(Slot::Entry(_)) => {
                return Err(CacheError::Serialization(format!(
                    "key {} holds a cache entry, not a counter",
                    key
                )));
            }
            None => RateLimitCounter {
                key: key.to_string(),
                count: 1,
                window_seconds,
                expires_at: window_end(now, window_seconds),
            },
        };

        slots.insert(key.to_string(), Slot::Counter(counter.clone()));
        Ok(counter)
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// 窗口到期的计数器直接删除，和 Redis 的 EXPIRE 效果一致
fn sweep_expired_counters(slots: &mut HashMap<String, Slot>, now: DateTime<Utc>) {
    slots.retain(|_, slot| !matches!(slot, Slot::Counter(c) if c.is_expired(now)));
}

fn window_end(now: DateTime<Utc>, window_seconds: u64) -> DateTime<Utc> {
    let secs = i64::try_from(window_seconds).unwrap_or(i64::MAX);
    TimeDelta::try_seconds(secs)
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
