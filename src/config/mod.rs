use std::env;
use std::fmt;
use std::time::Duration;

/// 缓存后端选择，启动时显式指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    Redis,
}

/// 定时清理接口的鉴权模式
///
/// 必须由 `CRON_AUTH` 显式选择，不会因为缺少密钥而静默关闭。
#[derive(Clone, PartialEq, Eq)]
pub enum CronAuth {
    Disabled,
    Enforced { secret: String },
}

impl fmt::Debug for CronAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CronAuth::Disabled => f.write_str("Disabled"),
            CronAuth::Enforced { .. } => f.write_str("Enforced { secret: *** }"),
        }
    }
}

/// 限流计数存储不可用时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitFailurePolicy {
    FailOpen,
    FailClosed,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "missing environment variable {}", var),
            ConfigError::Invalid { var, value } => {
                write!(f, "invalid value {:?} for environment variable {}", value, var)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub cache_backend: CacheBackend,
    pub redis_url: Option<String>,
    pub cache_key_prefix: String,
    pub store_timeout_ms: u64,
    pub stale_retention_secs: u64,
    pub short_ttl_secs: u64,
    pub long_ttl_secs: u64,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub rate_limit_on_store_error: RateLimitFailurePolicy,
    pub sports_api_base_url: String,
    pub sports_api_key: String,
    pub upstream_timeout_secs: u64,
    pub cron_auth: CronAuth,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
            cache_backend: CacheBackend::Memory,
            redis_url: None,
            cache_key_prefix: "fixtures:".to_string(),
            store_timeout_ms: 500,
            stale_retention_secs: 86_400,
            short_ttl_secs: 15 * 60,
            long_ttl_secs: 24 * 60 * 60,
            rate_limit_window_secs: 3600,
            rate_limit_requests: 100,
            rate_limit_on_store_error: RateLimitFailurePolicy::FailOpen,
            sports_api_base_url: "https://www.thesportsdb.com/api/v1/json".to_string(),
            sports_api_key: "3".to_string(),
            upstream_timeout_secs: 10,
            cron_auth: CronAuth::Disabled,
        }
    }
}

fn var(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: name,
            value: raw,
        }),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let defaults = Config::default();

        let cache_backend = match var("CACHE_BACKEND").as_deref() {
            None | Some("memory") => CacheBackend::Memory,
            Some("redis") => CacheBackend::Redis,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "CACHE_BACKEND",
                    value: other.to_string(),
                });
            }
        };
        let redis_url = var("REDIS_URL");
        if cache_backend == CacheBackend::Redis && redis_url.is_none() {
            return Err(ConfigError::Missing("REDIS_URL"));
        }

        let cron_auth = match var("CRON_AUTH").as_deref() {
            Some("disabled") => CronAuth::Disabled,
            Some("enforced") => CronAuth::Enforced {
                secret: var("CRON_SECRET").ok_or(ConfigError::Missing("CRON_SECRET"))?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "CRON_AUTH",
                    value: other.to_string(),
                });
            }
            None => return Err(ConfigError::Missing("CRON_AUTH")),
        };

        let rate_limit_on_store_error = match var("RATE_LIMIT_ON_STORE_ERROR").as_deref() {
            None | Some("open") => RateLimitFailurePolicy::FailOpen,
            Some("closed") => RateLimitFailurePolicy::FailClosed,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "RATE_LIMIT_ON_STORE_ERROR",
                    value: other.to_string(),
                });
            }
        };

        let config = Config {
            server_host: var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or("SERVER_PORT", defaults.server_port)?,
            api_base_uri: var("API_BASE_URI").unwrap_or(defaults.api_base_uri),
            cache_backend,
            redis_url,
            cache_key_prefix: var("CACHE_KEY_PREFIX").unwrap_or(defaults.cache_key_prefix),
            store_timeout_ms: parse_or("STORE_TIMEOUT_MS", defaults.store_timeout_ms)?,
            stale_retention_secs: parse_or("STALE_RETENTION", defaults.stale_retention_secs)?,
            short_ttl_secs: parse_or("CACHE_SHORT_TTL", defaults.short_ttl_secs)?,
            long_ttl_secs: parse_or("CACHE_LONG_TTL", defaults.long_ttl_secs)?,
            rate_limit_window_secs: parse_or("RATE_LIMIT_WINDOW", defaults.rate_limit_window_secs)?,
            rate_limit_requests: parse_or("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
            rate_limit_on_store_error,
            sports_api_base_url: var("SPORTS_API_BASE_URL")
                .unwrap_or(defaults.sports_api_base_url),
            sports_api_key: var("SPORTS_API_KEY").unwrap_or(defaults.sports_api_key),
            upstream_timeout_secs: parse_or("UPSTREAM_TIMEOUT", defaults.upstream_timeout_secs)?,
            cron_auth,
        };
        config.validate()?;
        Ok(config)
    }

    /// 有效期与窗口必须为正数
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("CACHE_SHORT_TTL", self.short_ttl_secs),
            ("CACHE_LONG_TTL", self.long_ttl_secs),
            ("RATE_LIMIT_WINDOW", self.rate_limit_window_secs),
            ("STORE_TIMEOUT_MS", self.store_timeout_ms),
        ];
        for (var, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    var,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}
