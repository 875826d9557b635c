//! Products domain module.
//!
//! Catalog-side records, the aggregated [`Product`] record and the rules that
//! join catalog entries with inventory stock. Pure logic (no IO, no HTTP).

pub mod adjust;
pub mod catalog;
pub mod product;

pub use adjust::DecrementPolicy;
pub use catalog::{CatalogEntry, CatalogPage};
pub use product::{Product, merge_listing};
