use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 酒吧实体
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BarEntity {
    pub id: Uuid,
    pub name: String,
    pub owner_email: String,
    pub address: String,
    /// 可投放赛事的屏幕数量
    pub screens: u32,
    pub created_at: DateTime<Utc>,
}

/// 新建酒吧所需字段
#[derive(Debug, Deserialize, Clone)]
pub struct NewBar {
    pub name: String,
    pub owner_email: String,
    pub address: String,
    #[serde(default = "default_screens")]
    pub screens: u32,
}

fn default_screens() -> u32 {
    1
}

impl NewBar {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        let email = self.owner_email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => return Err(format!("invalid owner_email {:?}", self.owner_email)),
        }
        if self.address.trim().is_empty() {
            return Err("address must not be empty".to_string());
        }
        if self.screens == 0 {
            return Err("screens must be at least 1".to_string());
        }
        Ok(())
    }
}
