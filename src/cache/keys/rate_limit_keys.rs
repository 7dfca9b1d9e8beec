/// 限流计数键前缀
const RATE_LIMIT_PREFIX: &str = "ratelimit:";

/// 定时清理所匹配的过期键模式
pub const STALE_PATTERN: &str = "*:stale:*";

/// 生成限流计数键，标识符原样使用
pub fn rate_limit_key(identifier: &str) -> String {
    format!("{}{}", RATE_LIMIT_PREFIX, identifier)
}
