//! Stock persistence boundary.
//!
//! Handlers talk to a `StockRepository` and never see SQL. Two
//! implementations exist: Postgres (production) and in-memory (tests/dev).

pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use in_memory::InMemoryStockRepository;
pub use postgres::PostgresStockRepository;
pub use repository::{StockRepository, StockStoreError};
