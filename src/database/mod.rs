// 数据模块
// 包含实体定义和存储库接口

pub mod models; // 实体定义
pub mod repositories; // 存储库接口与实现

// 重新导出常用类型，方便其他模块使用
pub use models::{BarEntity, NewBar};
pub use repositories::{BarRepository, InMemoryBarRepository};
