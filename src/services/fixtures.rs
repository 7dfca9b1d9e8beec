use std::sync::Arc;

use serde_json::Value;

use crate::cache::CacheStore;
use crate::upstream::{OriginError, OriginRequest, SportsOrigin};

/// 本次响应的缓存来源，写入 `x-cache` 响应头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Stale,
    Bypass,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Stale => "STALE",
            CacheStatus::Bypass => "BYPASS",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub body: Value,
    pub cache: CacheStatus,
}

/// 缓存有效期分级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlTiers {
    pub short_secs: u64,
    pub long_secs: u64,
}

impl Default for TtlTiers {
    fn default() -> Self {
        Self {
            short_secs: 15 * 60,
            long_secs: 24 * 60 * 60,
        }
    }
}

/// 赛事数据的旁路缓存读取
#[derive(Clone)]
pub struct FixtureService {
    store: Arc<dyn CacheStore>,
    origin: Arc<dyn SportsOrigin>,
    tiers: TtlTiers,
}

impl FixtureService {
    pub fn new(store: Arc<dyn CacheStore>, origin: Arc<dyn SportsOrigin>, tiers: TtlTiers) -> Self {
        Self {
            store,
            origin,
            tiers,
        }
    }

    /// 赛季与联赛信息很少变化，使用长有效期；赛程、转播等使用短有效期
    pub fn ttl_for(&self, request: &OriginRequest) -> u64 {
        match request {
            OriginRequest::LeagueSeasons { .. } | OriginRequest::League { .. } => {
                self.tiers.long_secs
            }
            _ => self.tiers.short_secs,
        }
    }

    /// 先查缓存，未命中或已过期时回源并写回
    ///
    /// 回源失败时如有陈旧数据则返回陈旧数据，失败结果不会写入缓存。
    /// 缓存读写失败只记录日志并绕过缓存。
    pub async fn fetch(&self, request: &OriginRequest) -> Result<Fetched, OriginError> {
        let key = request.cache_key();
        let mut stale = None;
        let mut store_healthy = true;

        match self.store.get(&key).await {
            Ok(Some(hit)) if hit.fresh => {
                tracing::debug!("Cache hit: {}", key);
                return Ok(Fetched {
                    body: hit.value,
                    cache: CacheStatus::Hit,
                });
            }
            Ok(Some(hit)) => {
                tracing::debug!("Cache entry expired: {}", key);
                stale = Some(hit.value);
            }
            Ok(None) => tracing::debug!("Cache miss: {}", key),
            Err(e) => {
                tracing::warn!("Cache read failed for {}, bypassing cache: {}", key, e);
                store_healthy = false;
            }
        }

        match self.origin.fetch(request).await {
            Ok(body) => {
                let cache = if store_healthy {
                    match self.store.set(&key, body.clone(), self.ttl_for(request)).await {
                        Ok(()) => CacheStatus::Miss,
                        Err(e) => {
                            tracing::warn!("Cache write failed for {}: {}", key, e);
                            CacheStatus::Bypass
                        }
                    }
                } else {
                    CacheStatus::Bypass
                };
                Ok(Fetched { body, cache })
            }
            Err(e) => match stale {
                Some(body) => {
                    tracing::warn!("Upstream failed for {}, serving stale entry: {}", key, e);
                    Ok(Fetched {
                        body,
                        cache: CacheStatus::Stale,
                    })
                }
                None => {
                    tracing::error!("Upstream failed for {}: {}", key, e);
                    Err(e)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheLookup, CacheStats, ManualClock, MemoryStore, RateLimitCounter};
    use crate::error::CacheError;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeOrigin {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    #[async_trait]
    impl SportsOrigin for FakeOrigin {
        async fn fetch(&self, request: &OriginRequest) -> Result<Value, OriginError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.failing.load(Ordering::SeqCst) {
                return Err(OriginError::Status(500));
            }
            Ok(json!({ request.collection(): [{ "call": n }] }))
        }
    }

    fn service() -> (FixtureService, Arc<FakeOrigin>, ManualClock) {
        let clock = ManualClock::default();
        let store = Arc::new(MemoryStore::with_clock(Arc::new(clock.clone())));
        let origin = Arc::new(FakeOrigin::default());
        let service = FixtureService::new(store, origin.clone(), TtlTiers::default());
        (service, origin, clock)
    }

    fn fixtures() -> OriginRequest {
        OriginRequest::LeagueFixtures {
            league_id: "4328".into(),
        }
    }

    #[tokio::test]
    async fn second_read_within_ttl_is_served_from_cache() {
        let (service, origin, _) = service();

        let first = service.fetch(&fixtures()).await.unwrap();
        assert_eq!(first.cache, CacheStatus::Miss);
        let second = service.fetch(&fixtures()).await.unwrap();
        assert_eq!(second.cache, CacheStatus::Hit);
        assert_eq!(second.body, first.body);
        assert_eq!(origin.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn short_tier_refetches_after_fifteen_minutes() {
        let (service, origin, clock) = service();
        service.fetch(&fixtures()).await.unwrap();

        clock.advance_secs(15 * 60);
        let refreshed = service.fetch(&fixtures()).await.unwrap();
        assert_eq!(refreshed.cache, CacheStatus::Miss);
        assert_eq!(refreshed.body, json!({"events": [{"call": 2}]}));
        assert_eq!(origin.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn seasons_use_the_long_tier() {
        let (service, origin, clock) = service();
        let seasons = OriginRequest::LeagueSeasons {
            league_id: "4328".into(),
        };
        service.fetch(&seasons).await.unwrap();

        clock.advance_secs(60 * 60);
        assert_eq!(service.fetch(&seasons).await.unwrap().cache, CacheStatus::Hit);
        assert_eq!(origin.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn upstream_failure_serves_stale_and_does_not_overwrite() {
        let (service, origin, clock) = service();
        let original = service.fetch(&fixtures()).await.unwrap().body;

        clock.advance_secs(16 * 60);
        origin.failing.store(true, Ordering::SeqCst);
        let fallback = service.fetch(&fixtures()).await.unwrap();
        assert_eq!(fallback.cache, CacheStatus::Stale);
        assert_eq!(fallback.body, original);
    }

    #[tokio::test]
    async fn upstream_failure_without_cache_is_an_error() {
        let (service, origin, _) = service();
        origin.failing.store(true, Ordering::SeqCst);
        assert_eq!(
            service.fetch(&fixtures()).await,
            Err(OriginError::Status(500))
        );

        // 失败结果不写入缓存
        origin.failing.store(false, Ordering::SeqCst);
        assert_eq!(
            service.fetch(&fixtures()).await.unwrap().cache,
            CacheStatus::Miss
        );
    }

    /// 读取正常、写入失败的存储
    struct ReadOnlyStore;

    #[async_trait]
    impl CacheStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<CacheLookup>, CacheError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: Value, _ttl: u64) -> Result<(), CacheError> {
            Err(CacheError::Timeout(std::time::Duration::from_millis(250)))
        }

        async fn invalidate_by_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
            Ok(0)
        }

        async fn stats(&self) -> Result<CacheStats, CacheError> {
            Ok(CacheStats {
                entries: 0,
                approx_bytes: None,
            })
        }

        async fn increment_counter(
            &self,
            _key: &str,
            _window_seconds: u64,
        ) -> Result<RateLimitCounter, CacheError> {
            Err(CacheError::StoreUnavailable("read only".into()))
        }

        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }

        fn backend_name(&self) -> &'static str {
            "read-only"
        }
    }

    #[tokio::test]
    async fn failed_cache_write_is_reported_as_bypass() {
        let origin = Arc::new(FakeOrigin::default());
        let service = FixtureService::new(
            Arc::new(ReadOnlyStore),
            origin.clone(),
            TtlTiers::default(),
        );

        let fetched = service.fetch(&fixtures()).await.unwrap();
        assert_eq!(fetched.cache, CacheStatus::Bypass);
        assert_eq!(fetched.body, json!({"events": [{"call": 1}]}));
    }
}
