//! The stock record.

use serde::{Deserialize, Serialize};

use crate::id::StockId;

/// The mutable fields of a stock.
///
/// This is what clients send on create and update; the id always comes from
/// storage (create) or the request path (update). A `stockid` key in the
/// incoming JSON is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDraft {
    pub name: String,
    pub price: f64,
    pub company: String,
}

/// A persisted stock row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "stockid")]
    pub stock_id: StockId,
    pub name: String,
    pub price: f64,
    pub company: String,
}

impl Stock {
    /// Attach a storage-assigned id to a draft.
    pub fn from_draft(stock_id: StockId, draft: StockDraft) -> Self {
        Self {
            stock_id,
            name: draft.name,
            price: draft.price,
            company: draft.company,
        }
    }

    /// Overwrite every mutable field, keeping the id.
    pub fn apply(&mut self, draft: StockDraft) {
        self.name = draft.name;
        self.price = draft.price;
        self.company = draft.company;
    }

    /// The mutable fields of this stock.
    pub fn draft(&self) -> StockDraft {
        StockDraft {
            name: self.name.clone(),
            price: self.price,
            company: self.company.clone(),
        }
    }
}
