//! Upstream service boundary.
//!
//! The gateway talks to two independently-owned HTTP services. Each is hidden
//! behind a trait so the aggregation layer can be exercised against in-memory
//! doubles, while production wiring uses the reqwest-backed clients.

pub mod catalog;
pub mod http;
pub mod in_memory;
pub mod inventory;
pub mod r#trait;

pub use catalog::HttpCatalogClient;
pub use http::build_http_client;
pub use in_memory::{InMemoryCatalog, InMemoryInventory};
pub use inventory::HttpInventoryClient;
pub use r#trait::{CatalogClient, CatalogQuery, InventoryClient};
