// 缓存模块
// 旁路缓存存储、缓存键、过期判断与限流

pub mod clock;
pub mod keys;
pub mod models;
pub mod operations;
pub mod pattern;
pub mod store;

// 重新导出常用类型，方便其他模块使用
pub use clock::{Clock, ManualClock, SystemClock};
pub use models::{CacheEntry, CacheLookup, CacheStats, RateLimitCounter, RateLimitDecision};
pub use operations::{MemoryStore, RateLimiter, RedisStore};
pub use store::CacheStore;
