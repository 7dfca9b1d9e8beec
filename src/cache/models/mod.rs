/// 缓存数据模型
/// 定义缓存条目与限流计数的结构体

// 缓存条目
pub mod entry;

// 限流计数
pub mod rate_limit;

pub use entry::{CacheEntry, CacheLookup, CacheStats};
pub use rate_limit::{RateLimitCounter, RateLimitDecision};
