use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client as RedisClient, RedisResult};

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::models::{CacheEntry, CacheLookup, CacheStats, RateLimitCounter};
use crate::cache::pattern::{self, GlobPattern};
use crate::cache::store::{CacheStore, validate_key, validate_ttl};
use crate::error::CacheError;

/// SCAN 每批建议数量
const SCAN_BATCH: usize = 500;

/// Redis 缓存
///
/// 条目以 JSON 信封存储，物理过期时间为 `ttl + stale_retention`，
/// 因此逻辑过期之后仍能在保留期内以陈旧数据读出。
pub struct RedisStore {
    redis: Arc<RedisClient>,
    prefix: String,
    timeout: Duration,
    stale_retention_secs: u64,
    clock: Arc<dyn Clock>,
}

impl RedisStore {
    pub fn new(
        redis: Arc<RedisClient>,
        prefix: impl Into<String>,
        timeout: Duration,
        stale_retention_secs: u64,
    ) -> Self {
        Self {
            redis,
            prefix: prefix.into(),
            timeout,
            stale_retention_secs,
            clock: Arc::new(SystemClock),
        }
    }

    fn redis_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// 所有 Redis 调用都受超时约束，超时不会被当作未命中
    async fn bounded<T, F>(&self, fut: F) -> Result<T, CacheError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(CacheError::from),
            Err(_) => {
                tracing::warn!("Redis call exceeded {:?}", self.timeout);
                Err(CacheError::Timeout(self.timeout))
            }
        }
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        self.bounded(self.redis.get_multiplexed_async_connection())
            .await
    }

    async fn scan(
        &self,
        conn: &mut MultiplexedConnection,
        redis_pattern: &str,
    ) -> Result<Vec<String>, CacheError> {
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        loop {
            let mut cmd = redis::cmd("SCAN");
            cmd.arg(cursor)
                .arg("MATCH")
                .arg(redis_pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH);
            let (next, batch): (u64, Vec<String>) = self.bounded(cmd.query_async(conn)).await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }
        // SCAN 可能返回重复的键
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<CacheLookup>, CacheError> {
        validate_key(key)?;
        let mut conn = self.connection().await?;

        let raw: Option<String> = self.bounded(conn.get(self.redis_key(key))).await?;
        match raw {
            Some(json) => {
                let entry: CacheEntry = serde_json::from_str(&json)?;
                Ok(Some(entry.into_lookup(self.clock.now())))
            }
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
        let json = serde_json::to_string(&entry)?;
        let expire = ttl_seconds.saturating_add(self.stale_retention_secs);

        let mut conn = self.connection().await?;
        let _: () = self
            .bounded(conn.set_ex(self.redis_key(key), json, expire))
            .await?;
        Ok(())
    }

    async fn invalidate_by_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let glob = GlobPattern::parse(pattern)?;
        let redis_pattern = format!("{}{}", pattern::escape(&self.prefix), glob.as_str());

        let mut conn = self.connection().await?;
        let keys = self.scan(&mut conn, &redis_pattern).await?;

        let mut removed = 0u64;
        for chunk in keys.chunks(SCAN_BATCH) {
            let deleted: u64 = self.bounded(conn.del(chunk.to_vec())).await?;
            removed += deleted;
        }

        tracing::debug!("Invalidated {} redis keys matching {}", removed, redis_pattern);
        Ok(removed)
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        let mut conn = self.connection().await?;
        let redis_pattern = format!("{}*", pattern::escape(&self.prefix));
        let keys = self.scan(&mut conn, &redis_pattern).await?;

        Ok(CacheStats {
            entries: keys.len() as u64,
            approx_bytes: None,
        })
    }

    async fn increment_counter(
        &self,
        key: &str,
        window_seconds: u64,
    ) -> Result<RateLimitCounter, CacheError> {
        validate_key(key)?;
        validate_ttl(window_seconds)?;

        let redis_key = self.redis_key(key);
        let mut conn = self.connection().await?;

        // INCR 与 TTL 在同一个事务里；没有过期时间说明是新窗口，补上 EXPIRE
        let mut pipe = redis::pipe();
        pipe.atomic().incr(&redis_key, 1).ttl(&redis_key);
        let (count, ttl): (u64, i64) = self.bounded(pipe.query_async(&mut conn)).await?;

        let (remaining, opens_window) = window_remaining(ttl, window_seconds);
        if opens_window {
            let _: () = self.bounded(conn.expire(&redis_key, remaining)).await?;
        }
        let now = self.clock.now();

        Ok(RateLimitCounter {
            key: key.to_string(),
            count,
            window_seconds,
            expires_at: TimeDelta::try_seconds(remaining)
                .and_then(|d| now.checked_add_signed(d))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        })
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

/// 根据 TTL 返回窗口剩余秒数，以及是否需要设置过期时间
///
/// TTL 为负表示键没有过期时间：首个请求，或上一次 EXPIRE 没有执行成功。
fn window_remaining(ttl: i64, window_seconds: u64) -> (i64, bool) {
    if ttl > 0 {
        (ttl, false)
    } else {
        (i64::try_from(window_seconds).unwrap_or(i64::MAX), true)
    }
}
