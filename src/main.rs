use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use fixtures_backend::{
    AppState,
    cache::{CacheStore, MemoryStore, RedisStore},
    config::{CacheBackend, Config},
    database::InMemoryBarRepository,
    router::create_router,
    upstream::SportsApiClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        "Cache backend: {:?}, cron auth: {:?}, rate limit store errors: {:?}",
        config.cache_backend,
        config.cron_auth,
        config.rate_limit_on_store_error
    );

    // 设置缓存存储
    let store: Arc<dyn CacheStore> = match config.cache_backend {
        CacheBackend::Memory => Arc::new(MemoryStore::new()),
        CacheBackend::Redis => {
            let url = config.redis_url.clone().expect("REDIS_URL is required");
            let redis_client = redis::Client::open(url).expect("Failed to create Redis client");
            Arc::new(RedisStore::new(
                Arc::new(redis_client),
                config.cache_key_prefix.clone(),
                config.store_timeout(),
                config.stale_retention_secs,
            ))
        }
    };

    // 设置上游客户端
    let origin = SportsApiClient::new(
        &config.sports_api_base_url,
        &config.sports_api_key,
        config.upstream_timeout(),
    )
    .expect("Failed to build upstream HTTP client");

    let state = AppState::new(
        config.clone(),
        store,
        Arc::new(origin),
        Arc::new(InMemoryBarRepository::new()),
    );
    let app = create_router(state);

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
