use serde::{Deserialize, Serialize};

use stocks_core::StockId;

/// Body returned by create, update and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    pub id: StockId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl MutationResponse {
    pub fn created(id: StockId) -> Self {
        Self {
            id,
            message: "stock created successfully".to_string(),
        }
    }

    pub fn updated(id: StockId, rows_affected: u64) -> Self {
        Self {
            id,
            message: format!(
                "Stock updated successfully. Total rows/records affected {rows_affected}"
            ),
        }
    }

    pub fn deleted(id: StockId, rows_affected: u64) -> Self {
        Self {
            id,
            message: format!(
                "Stock deleted successfully. Total rows/records affected {rows_affected}"
            ),
        }
    }
}
