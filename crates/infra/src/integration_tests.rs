//! Integration tests for the Postgres stock store.
//!
//! These run against a real database only when `TEST_POSTGRES_URL` is set;
//! otherwise each test returns immediately.

use std::time::Duration;

use stocks_core::{StockDraft, StockId};

use crate::config::DatabaseConfig;
use crate::db;
use crate::stock_store::{PostgresStockRepository, StockRepository};

async fn setup() -> Option<PostgresStockRepository> {
    let url = std::env::var("TEST_POSTGRES_URL").ok()?;
    let config = DatabaseConfig {
        url,
        max_connections: 2,
        acquire_timeout: Duration::from_secs(5),
    };
    let pool = db::connect(&config).await.expect("failed to connect to test database");
    db::ensure_schema(&pool).await.expect("failed to create stocks table");
    Some(PostgresStockRepository::new(pool))
}

fn draft(name: &str) -> StockDraft {
    StockDraft {
        name: name.to_string(),
        price: 10.5,
        company: format!("{name} Corp"),
    }
}

#[tokio::test]
async fn create_read_update_delete_cycle() {
    let Some(repo) = setup().await else { return };

    let id = repo.insert(&draft("Acme")).await.unwrap();
    let stock = repo.get_by_id(id).await.unwrap().expect("inserted row should exist");
    assert_eq!(stock.draft(), draft("Acme"));

    assert_eq!(repo.update(id, &draft("Globex")).await.unwrap(), 1);
    let stock = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stock.name, "Globex");

    let all = repo.get_all().await.unwrap();
    assert!(all.iter().any(|s| s.stock_id == id));

    assert_eq!(repo.delete(id).await.unwrap(), 1);
    assert!(repo.get_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn writes_to_missing_id_affect_zero_rows() {
    let Some(repo) = setup().await else { return };

    let missing = StockId::new(i64::MAX);
    assert_eq!(repo.update(missing, &draft("Ghost")).await.unwrap(), 0);
    assert_eq!(repo.delete(missing).await.unwrap(), 0);
    assert!(repo.get_by_id(missing).await.unwrap().is_none());
}
