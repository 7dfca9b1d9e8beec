use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::request::OriginRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum OriginError {
    Request(String),
    Status(u16),
    Decode(String),
}

impl fmt::Display for OriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginError::Request(msg) => write!(f, "upstream request failed: {}", msg),
            OriginError::Status(code) => write!(f, "upstream returned status {}", code),
            OriginError::Decode(msg) => write!(f, "upstream body could not be decoded: {}", msg),
        }
    }
}

impl std::error::Error for OriginError {}

impl From<reqwest::Error> for OriginError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            OriginError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            OriginError::Status(status.as_u16())
        } else {
            OriginError::Request(e.to_string())
        }
    }
}

/// 赛事数据源，缓存未命中时由调用方查询
#[async_trait]
pub trait SportsOrigin: Send + Sync {
    async fn fetch(&self, request: &OriginRequest) -> Result<Value, OriginError>;
}

/// 第三方体育数据 HTTP 接口
pub struct SportsApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SportsApiClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, OriginError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OriginError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.api_key, path)
    }
}

#[async_trait]
impl SportsOrigin for SportsApiClient {
    async fn fetch(&self, request: &OriginRequest) -> Result<Value, OriginError> {
        let (path, query) = request.endpoint();
        tracing::debug!("Fetching upstream {} {:?}", path, query);

        let response = self.http.get(self.url(path)).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Upstream {} responded with {}", path, status);
            return Err(OriginError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        Ok(request.normalize(body))
    }
}
