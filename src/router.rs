use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    cache::RateLimiter,
    middleware::{RateLimitGuard, cron_auth, log_errors, rate_limit},
    routes,
};

// 赛事数据相关的路由
fn fixture_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/fixtures/league/{league_id}",
            get(routes::fixtures::league_fixtures),
        )
        .route("/calendar", get(routes::fixtures::calendar))
        .route("/tv", get(routes::fixtures::tv_guide))
        .route("/leagues/{league_id}", get(routes::leagues::league))
        .route("/leagues/{league_id}/seasons", get(routes::leagues::seasons))
        .route("/teams/search", get(routes::leagues::search_teams))
}

// 酒吧相关的路由
fn bar_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bars",
            post(routes::bars::create_bar).get(routes::bars::list_bars),
        )
        .route("/bars/{bar_id}", get(routes::bars::get_bar))
}

// 定时任务路由，需要单独鉴权
fn cron_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/cron/cleanup",
            get(routes::cron::cleanup).post(routes::cron::cleanup),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            cron_auth,
        ))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let config = &state.config;

    let api = Router::new()
        .route("/ping", get(routes::health::ping))
        .merge(fixture_routes())
        .merge(bar_routes())
        .merge(cron_routes(&state));

    // axum 不允许在根路径 nest
    let base = config.api_base_uri.trim_matches('/');
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{}", base), api)
    };

    let limiter = RateLimiter::new(
        state.store.clone(),
        config.rate_limit_requests,
        config.rate_limit_window_secs,
    );
    let guard = Arc::new(RateLimitGuard::new(
        limiter,
        config.rate_limit_on_store_error,
    ));

    // 添加日志中间件和限流中间件
    let router = router
        .layer(axum::middleware::from_fn(log_errors))
        .layer(axum::middleware::from_fn_with_state(guard, rate_limit));

    // 开发模式下允许所有来源跨域
    #[cfg(debug_assertions)]
    let router = router.layer(tower_http::cors::CorsLayer::permissive());

    router.with_state(state)
}
