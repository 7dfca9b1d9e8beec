// 业务服务
// 路由使用的旁路缓存读取逻辑

pub mod fixtures;

pub use fixtures::{CacheStatus, Fetched, FixtureService, TtlTiers};
