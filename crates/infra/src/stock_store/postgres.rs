//! Postgres-backed stock store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StockStoreError |
//! |------------|----------------------|-----------------|
//! | Database | class `23` (integrity) | `Constraint` |
//! | Database | class `08` (connection) | `Unavailable` |
//! | Database | any other | `Query` |
//! | PoolTimedOut / PoolClosed / Io / Tls | N/A | `Unavailable` |
//! | Other | N/A | `Query` |

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use tracing::{instrument, Span};

use stocks_core::{Stock, StockDraft, StockId};

use super::{StockRepository, StockStoreError};

/// Postgres-backed `StockRepository`.
///
/// Every call checks a connection out of the pool and returns it when the
/// statement completes. The pool bounds concurrency and enforces the
/// checkout timeout.
#[derive(Debug, Clone)]
pub struct PostgresStockRepository {
    pool: PgPool,
}

impl PostgresStockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl StockRepository for PostgresStockRepository {
    #[instrument(skip(self, draft), fields(stock_id), err)]
    async fn insert(&self, draft: &StockDraft) -> Result<StockId, StockStoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO stocks (name, price, company)
            VALUES ($1, $2, $3)
            RETURNING stockid
            "#,
        )
        .bind(&draft.name)
        .bind(draft.price)
        .bind(&draft.company)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_stock", e))?;

        Span::current().record("stock_id", id);
        Ok(StockId::new(id))
    }

    #[instrument(skip(self), fields(stock_id = %id), err)]
    async fn get_by_id(&self, id: StockId) -> Result<Option<Stock>, StockStoreError> {
        let row = sqlx::query(
            r#"
            SELECT stockid, name, price, company
            FROM stocks
            WHERE stockid = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_stock", e))?;

        match row {
            Some(row) => Ok(Some(decode_row(&row)?)),
            None => {
                tracing::debug!("no stock row for id");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self), fields(stock_count), err)]
    async fn get_all(&self) -> Result<Vec<Stock>, StockStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT stockid, name, price, company
            FROM stocks
            ORDER BY stockid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_stocks", e))?;

        let stocks = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
        Span::current().record("stock_count", stocks.len());
        Ok(stocks)
    }

    #[instrument(skip(self, draft), fields(stock_id = %id, rows_affected), err)]
    async fn update(&self, id: StockId, draft: &StockDraft) -> Result<u64, StockStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE stocks
            SET name = $2, price = $3, company = $4
            WHERE stockid = $1
            "#,
        )
        .bind(id.get())
        .bind(&draft.name)
        .bind(draft.price)
        .bind(&draft.company)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_stock", e))?;

        let affected = result.rows_affected();
        Span::current().record("rows_affected", affected);
        Ok(affected)
    }

    #[instrument(skip(self), fields(stock_id = %id, rows_affected), err)]
    async fn delete(&self, id: StockId) -> Result<u64, StockStoreError> {
        let result = sqlx::query("DELETE FROM stocks WHERE stockid = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_stock", e))?;

        let affected = result.rows_affected();
        Span::current().record("rows_affected", affected);
        Ok(affected)
    }
}

fn decode_row(row: &PgRow) -> Result<Stock, StockStoreError> {
    StockRow::from_row(row)
        .map(Stock::from)
        .map_err(|e| StockStoreError::Query(format!("failed to decode stock row: {e}")))
}

/// Map a sqlx error into the storage error taxonomy.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StockStoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code() {
                Some(code) if code.starts_with("23") => StockStoreError::Constraint(msg),
                Some(code) if code.starts_with("08") => StockStoreError::Unavailable(msg),
                _ => StockStoreError::Query(msg),
            }
        }
        sqlx::Error::PoolTimedOut => StockStoreError::Unavailable(format!(
            "timed out waiting for a database connection in {operation}"
        )),
        sqlx::Error::PoolClosed => {
            StockStoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::Io(e) => {
            StockStoreError::Unavailable(format!("i/o error in {operation}: {e}"))
        }
        sqlx::Error::Tls(e) => {
            StockStoreError::Unavailable(format!("tls error in {operation}: {e}"))
        }
        other => StockStoreError::Query(format!("sqlx error in {operation}: {other}")),
    }
}

// SQLx row types

#[derive(Debug)]
struct StockRow {
    stockid: i64,
    name: String,
    price: f64,
    company: String,
}

impl<'r> FromRow<'r, PgRow> for StockRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(StockRow {
            stockid: row.try_get("stockid")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            company: row.try_get("company")?,
        })
    }
}

impl From<StockRow> for Stock {
    fn from(row: StockRow) -> Self {
        Stock {
            stock_id: StockId::new(row.stockid),
            name: row.name,
            price: row.price,
            company: row.company,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;

    use sqlx::error::{DatabaseError, ErrorKind};

    /// Database error carrying a fixed SQLSTATE code.
    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    struct SqlStateError {
        code: &'static str,
        message: &'static str,
    }

    impl DatabaseError for SqlStateError {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn database_error(code: &'static str, message: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(SqlStateError { code, message }))
    }

    #[test]
    fn unique_violation_maps_to_constraint() {
        let err = map_sqlx_error(
            "insert_stock",
            database_error("23505", "duplicate key value violates unique constraint"),
        );
        match err {
            StockStoreError::Constraint(msg) => {
                assert!(msg.contains("insert_stock"));
                assert!(msg.contains("duplicate key"));
            }
            other => panic!("Expected Constraint, got {other:?}"),
        }
    }

    #[test]
    fn not_null_violation_maps_to_constraint() {
        let err = map_sqlx_error("update_stock", database_error("23502", "null value in column"));
        assert!(matches!(err, StockStoreError::Constraint(_)));
    }

    #[test]
    fn connection_failure_code_maps_to_unavailable() {
        let err = map_sqlx_error("get_stock", database_error("08006", "connection failure"));
        assert!(matches!(err, StockStoreError::Unavailable(_)));
    }

    #[test]
    fn undefined_table_maps_to_query_error() {
        let err = map_sqlx_error(
            "list_stocks",
            database_error("42P01", "relation \"stocks\" does not exist"),
        );
        assert!(matches!(err, StockStoreError::Query(_)));
    }

    #[test]
    fn pool_timeout_maps_to_unavailable() {
        let err = map_sqlx_error("get_stock", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StockStoreError::Unavailable(_)));
    }

    #[test]
    fn pool_closed_maps_to_unavailable() {
        let err = map_sqlx_error("insert_stock", sqlx::Error::PoolClosed);
        match err {
            StockStoreError::Unavailable(msg) => assert!(msg.contains("insert_stock")),
            other => panic!("Expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn row_not_found_maps_to_query_error() {
        let err = map_sqlx_error("insert_stock", sqlx::Error::RowNotFound);
        assert!(matches!(err, StockStoreError::Query(_)));
    }

    #[test]
    fn io_error_maps_to_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = map_sqlx_error("list_stocks", sqlx::Error::Io(io));
        assert!(matches!(err, StockStoreError::Unavailable(_)));
    }

    #[test]
    fn row_converts_to_stock() {
        let stock = Stock::from(StockRow {
            stockid: 4,
            name: "Acme".to_string(),
            price: 10.5,
            company: "Acme Corp".to_string(),
        });
        assert_eq!(stock.stock_id, StockId::new(4));
        assert_eq!(stock.company, "Acme Corp");
    }
}
