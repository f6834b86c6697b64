//! Infrastructure layer: configuration, Postgres pool, stock storage.

pub mod config;
pub mod db;
pub mod stock_store;

pub use config::{AppConfig, ConfigError, DatabaseConfig};
pub use stock_store::{
    InMemoryStockRepository, PostgresStockRepository, StockRepository, StockStoreError,
};

#[cfg(test)]
mod integration_tests;
