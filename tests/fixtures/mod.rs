#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use chrono::{DateTime, Utc};
use fixtures_backend::{
    AppState,
    cache::{CacheLookup, CacheStats, CacheStore, ManualClock, MemoryStore, RateLimitCounter},
    config::Config,
    error::CacheError,
    database::InMemoryBarRepository,
    router::create_router,
    upstream::{OriginError, OriginRequest, SportsOrigin},
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// 可控的上游，记录调用次数
#[derive(Default)]
pub struct FakeOrigin {
    pub calls: AtomicUsize,
    pub failing: AtomicBool,
}

impl FakeOrigin {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SportsOrigin for FakeOrigin {
    async fn fetch(&self, request: &OriginRequest) -> Result<Value, OriginError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(OriginError::Status(503));
        }
        let (path, query) = request.endpoint();
        Ok(json!({
            request.collection(): [{ "path": path, "query": query[0].1, "call": n }]
        }))
    }
}

/// 所有操作都失败的存储，模拟 Redis 宕机
pub struct DownStore;

impl DownStore {
    fn refused<T>() -> Result<T, CacheError> {
        Err(CacheError::StoreUnavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl CacheStore for DownStore {
    async fn get(&self, _key: &str) -> Result<Option<CacheLookup>, CacheError> {
        Self::refused()
    }

    async fn set(&self, _key: &str, _value: Value, _ttl_seconds: u64) -> Result<(), CacheError> {
        Self::refused()
    }

    async fn invalidate_by_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
        Self::refused()
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        Self::refused()
    }

    async fn increment_counter(
        &self,
        _key: &str,
        _window_seconds: u64,
    ) -> Result<RateLimitCounter, CacheError> {
        Self::refused()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn backend_name(&self) -> &'static str {
        "down"
    }
}

/// 挂在宕机存储上的应用
pub struct DownApp {
    pub router: Router,
    pub origin: Arc<FakeOrigin>,
}

impl DownApp {
    pub fn with_config(config: Config) -> Self {
        let origin = Arc::new(FakeOrigin::default());
        let state = AppState::new(
            config,
            Arc::new(DownStore),
            origin.clone(),
            Arc::new(InMemoryBarRepository::new()),
        );

        Self {
            router: create_router(state),
            origin,
        }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub origin: Arc<FakeOrigin>,
    pub clock: ManualClock,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let clock = ManualClock::default();
        let store = Arc::new(MemoryStore::with_clock(Arc::new(clock.clone())));
        let origin = Arc::new(FakeOrigin::default());

        let state = AppState::new(
            config,
            store.clone() as Arc<dyn CacheStore>,
            origin.clone(),
            Arc::new(InMemoryBarRepository::new()),
        );

        Self {
            router: create_router(state),
            store,
            origin,
            clock,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
