// 上游数据源
// 第三方赛事接口的请求定义与 HTTP 客户端

pub mod client;
pub mod request;

pub use client::{OriginError, SportsApiClient, SportsOrigin};
pub use request::OriginRequest;
