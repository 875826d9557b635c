//! Inventory-side records.
//!
//! Wire shapes owned by the stock-inventory service, plus the lookup index used
//! when joining a full stock listing against catalog entries. No IO here.

pub mod stock;

pub use stock::{DeletionAck, NewStockRecord, StockIndex, StockRecord, StockUpdate};
