use std::sync::Arc;

use stocks_core::{Stock, StockDraft, StockId};
use thiserror::Error;

/// Storage-level failure.
///
/// A missing row is never an error here: reads return `None` and writes
/// report zero rows affected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockStoreError {
    /// The database could not be reached (pool closed, checkout timeout, I/O).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The database rejected the write (SQLSTATE class 23).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Any other query or row-decoding failure.
    #[error("query failed: {0}")]
    Query(String),
}

/// CRUD access to the `stocks` table.
///
/// Each method issues exactly one statement. There are no transactions
/// spanning calls.
#[async_trait::async_trait]
pub trait StockRepository: Send + Sync {
    /// Insert a new row and return the id storage assigned to it.
    async fn insert(&self, draft: &StockDraft) -> Result<StockId, StockStoreError>;

    /// Fetch one row; `Ok(None)` when no row has this id.
    async fn get_by_id(&self, id: StockId) -> Result<Option<Stock>, StockStoreError>;

    /// Fetch every row, ordered by id.
    async fn get_all(&self) -> Result<Vec<Stock>, StockStoreError>;

    /// Overwrite name/price/company. Returns rows affected (0 if absent).
    async fn update(&self, id: StockId, draft: &StockDraft) -> Result<u64, StockStoreError>;

    /// Remove the row. Returns rows affected (0 if absent).
    async fn delete(&self, id: StockId) -> Result<u64, StockStoreError>;
}

#[async_trait::async_trait]
impl<S> StockRepository for Arc<S>
where
    S: StockRepository + ?Sized,
{
    async fn insert(&self, draft: &StockDraft) -> Result<StockId, StockStoreError> {
        (**self).insert(draft).await
    }

    async fn get_by_id(&self, id: StockId) -> Result<Option<Stock>, StockStoreError> {
        (**self).get_by_id(id).await
    }

    async fn get_all(&self) -> Result<Vec<Stock>, StockStoreError> {
        (**self).get_all().await
    }

    async fn update(&self, id: StockId, draft: &StockDraft) -> Result<u64, StockStoreError> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: StockId) -> Result<u64, StockStoreError> {
        (**self).delete(id).await
    }
}
