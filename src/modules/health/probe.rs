use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;

/// Connectivity check of the backing store
#[async_trait]
pub trait StorageProbe: Send + Sync {
    async fn ping(&self) -> Result<()>;
}

pub struct MySqlStorageProbe {
    pool: MySqlPool,
}

impl MySqlStorageProbe {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageProbe for MySqlStorageProbe {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
