use std::collections::BTreeMap;
use std::sync::RwLock;

use stocks_core::{Stock, StockDraft, StockId};

use super::{StockRepository, StockStoreError};

/// In-memory stock store for tests/dev.
///
/// Ids start at 1 and increase monotonically, like a `BIGSERIAL` column.
/// Deleted ids are never reused.
#[derive(Debug)]
pub struct InMemoryStockRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    rows: BTreeMap<StockId, Stock>,
    next_id: i64,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn poisoned() -> StockStoreError {
        StockStoreError::Unavailable("in-memory stock store lock poisoned".to_string())
    }
}

impl Default for InMemoryStockRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn insert(&self, draft: &StockDraft) -> Result<StockId, StockStoreError> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;
        let id = StockId::new(inner.next_id);
        inner.next_id += 1;
        inner.rows.insert(id, Stock::from_draft(id, draft.clone()));
        tracing::debug!(stock_id = %id, "inserted stock");
        Ok(id)
    }

    async fn get_by_id(&self, id: StockId) -> Result<Option<Stock>, StockStoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Stock>, StockStoreError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn update(&self, id: StockId, draft: &StockDraft) -> Result<u64, StockStoreError> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;
        match inner.rows.get_mut(&id) {
            Some(stock) => {
                stock.apply(draft.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: StockId) -> Result<u64, StockStoreError> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;
        Ok(u64::from(inner.rows.remove(&id).is_some()))
    }
}
