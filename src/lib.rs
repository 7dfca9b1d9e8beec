use std::sync::Arc;

use cache::CacheStore;
use config::Config;
use database::BarRepository;
use services::{FixtureService, TtlTiers};
use upstream::SportsOrigin;

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod services;
pub mod upstream;

/// 应用状态，进程启动时构建一次，按引用传给每个处理器
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn CacheStore>,
    pub fixtures: FixtureService,
    pub bars: Arc<dyn BarRepository>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn CacheStore>,
        origin: Arc<dyn SportsOrigin>,
        bars: Arc<dyn BarRepository>,
    ) -> Self {
        let tiers = TtlTiers {
            short_secs: config.short_ttl_secs,
            long_secs: config.long_ttl_secs,
        };
        Self {
            fixtures: FixtureService::new(store.clone(), origin, tiers),
            config,
            store,
            bars,
        }
    }
}
