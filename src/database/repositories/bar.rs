// 酒吧存储库
// 目前只有进程内实现，不做持久化

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::bar::{BarEntity, NewBar};

/// 酒吧存储库接口，可替换为持久化实现而不影响调用方
#[async_trait]
pub trait BarRepository: Send + Sync {
    async fn create(&self, bar: NewBar) -> BarEntity;
    async fn find_by_id(&self, id: Uuid) -> Option<BarEntity>;
    async fn list(&self) -> Vec<BarEntity>;
}

/// 进程内存储库，重启即丢失
#[derive(Default)]
pub struct InMemoryBarRepository {
    bars: RwLock<Vec<BarEntity>>,
}

impl InMemoryBarRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BarRepository for InMemoryBarRepository {
    async fn create(&self, bar: NewBar) -> BarEntity {
        let entity = BarEntity {
            id: Uuid::new_v4(),
            name: bar.name.trim().to_string(),
            owner_email: bar.owner_email.trim().to_lowercase(),
            address: bar.address.trim().to_string(),
            screens: bar.screens,
            created_at: Utc::now(),
        };

        self.bars.write().await.push(entity.clone());
        tracing::info!("Registered bar {} ({})", entity.name, entity.id);
        entity
    }

    async fn find_by_id(&self, id: Uuid) -> Option<BarEntity> {
        self.bars.read().await.iter().find(|b| b.id == id).cloned()
    }

    async fn list(&self) -> Vec<BarEntity> {
        self.bars.read().await.clone()
    }
}
