use std::fmt;
use std::time::Duration;

use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 缓存层错误
///
/// 存储不可用与超时必须与"未命中"区分开，由调用方决定是否绕过缓存。
#[derive(Debug, Clone, PartialEq)]
pub enum CacheError {
    /// 后端存储连接或命令失败
    StoreUnavailable(String),
    /// 后端存储在限定时间内没有响应
    Timeout(Duration),
    /// 键或模式非法，在访问存储前被拒绝
    InvalidArgument(String),
    /// 缓存内容无法序列化或反序列化
    Serialization(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::StoreUnavailable(msg) => write!(f, "cache store unavailable: {}", msg),
            CacheError::Timeout(after) => {
                write!(f, "cache store timed out after {}ms", after.as_millis())
            }
            CacheError::InvalidArgument(msg) => write!(f, "invalid cache argument: {}", msg),
            CacheError::Serialization(msg) => write!(f, "cache serialization error: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        // 只有连接层面的故障算作不可用，类型不符等按内容错误处理，与内存实现一致
        if e.is_io_error()
            || e.is_connection_refusal()
            || e.is_connection_dropped()
            || e.is_timeout()
        {
            CacheError::StoreUnavailable(e.to_string())
        } else {
            CacheError::Serialization(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(e.to_string())
    }
}

impl CacheError {
    /// 是否为后端故障（不可用或超时），而非调用参数问题
    pub fn is_store_failure(&self) -> bool {
        matches!(self, CacheError::StoreUnavailable(_) | CacheError::Timeout(_))
    }
}

#[derive(Debug)]
pub enum AppError {
    Unauthorized,
    NotFound(String),
    Validation(String),
    RateLimited { retry_after: u64 },
    StoreUnavailable(String),
    InternalServerError,
}

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_message: String,
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        match e {
            CacheError::InvalidArgument(msg) => AppError::Validation(msg),
            CacheError::StoreUnavailable(_) | CacheError::Timeout(_) => {
                AppError::StoreUnavailable(e.to_string())
            }
            CacheError::Serialization(_) => AppError::InternalServerError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::RateLimited { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("Too many requests, retry in {} seconds", retry_after),
            ),
            AppError::StoreUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            code: status.as_u16() as i32,
            error_message,
        });

        (status, body).into_response()
    }
}
