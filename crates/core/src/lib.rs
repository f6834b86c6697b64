//! `stocks-core` — the stock record and its identifiers.
//!
//! This crate contains **pure domain** types (no storage or HTTP concerns).

pub mod error;
pub mod id;
pub mod stock;

pub use error::DomainError;
pub use id::StockId;
pub use stock::{Stock, StockDraft};
