/// 缓存键模块
/// 所有缓存键都在这里生成，保证不同资源不会共用同一个键

// 赛事数据缓存键
pub mod fixture_keys;

// 限流缓存键
pub mod rate_limit_keys;

pub use fixture_keys::{day_key, fixtures_key, league_key, seasons_key, teams_key, tv_key};
pub use rate_limit_keys::{STALE_PATTERN, rate_limit_key};
