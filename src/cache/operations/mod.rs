/// 缓存操作
/// 存储后端实现与基于存储的限流

// 进程内存储
pub mod memory;

// Redis 存储
pub mod redis_store;

// 限流
pub mod rate_limit;

pub use memory::MemoryStore;
pub use rate_limit::RateLimiter;
pub use redis_store::RedisStore;
