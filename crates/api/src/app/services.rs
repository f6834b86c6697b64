use std::sync::Arc;

use anyhow::Context;

use stocks_infra::{
    db, AppConfig, InMemoryStockRepository, PostgresStockRepository, StockRepository,
};

/// Shared handles the request handlers need.
#[derive(Clone)]
pub struct AppServices {
    stocks: Arc<dyn StockRepository>,
}

impl AppServices {
    pub fn new(stocks: Arc<dyn StockRepository>) -> Self {
        Self { stocks }
    }

    /// Services backed by a fresh in-memory store (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStockRepository::new()))
    }

    pub fn stocks(&self) -> &dyn StockRepository {
        self.stocks.as_ref()
    }
}

/// Wire storage from configuration.
///
/// With a database configured this connects the pool and creates the
/// `stocks` table if needed; connection failures abort startup.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    match &config.database {
        Some(db_config) => {
            let pool = db::connect(db_config)
                .await
                .context("failed to connect to postgres")?;
            db::ensure_schema(&pool)
                .await
                .context("failed to create stocks table")?;
            Ok(AppServices::new(Arc::new(PostgresStockRepository::new(pool))))
        }
        None => {
            tracing::warn!("POSTGRES_URL not set; using in-memory stock store");
            Ok(AppServices::in_memory())
        }
    }
}
