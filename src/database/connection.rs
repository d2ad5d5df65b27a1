use super::executor::ConnectionProvider;
use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::query_builder::QueryPlan;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::time::Duration;
use tracing::info;

/// Owns the PostgreSQL pool shared by every data-access object
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    pub async fn new(config: &DatabaseConfig) -> std::result::Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.database_url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Database pool established"
        );

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn health_check(&self) -> std::result::Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 as health")
            .fetch_one(&self.pool)
            .await?;

        let health: i32 = row.get("health");
        Ok(health == 1)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ConnectionProvider for DatabaseConnection {
    type Row = PgRow;

    async fn fetch_mapped<T, F>(&self, plan: &QueryPlan, mapper: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Self::Row) -> std::result::Result<T, sqlx::Error> + Send + Sync,
    {
        self.pool.fetch_mapped(plan, mapper).await
    }
}
