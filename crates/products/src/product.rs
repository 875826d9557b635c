use shelfgate_core::ProductId;
use shelfgate_inventory::{DeletionAck, StockIndex, StockRecord};

use crate::catalog::CatalogEntry;

/// The aggregated product record handed back to API clients.
///
/// Rebuilt on every request from one catalog entry and one stock record; it
/// is never stored. Every field is optional because deletion acknowledgements
/// carry only `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub stock: Option<i64>,
    pub message: Option<String>,
}

impl Product {
    /// Join a catalog entry with a stock count. Identity comes from the catalog.
    pub fn from_catalog(entry: CatalogEntry, stock: i64) -> Self {
        Self {
            id: Some(entry.id),
            name: entry.product_name,
            code: entry.code,
            stock: Some(stock),
            message: None,
        }
    }

    /// Join a catalog entry with an optional single stock lookup (absent → 0).
    pub fn from_lookup(entry: CatalogEntry, record: Option<StockRecord>) -> Self {
        let stock = record.map(|r| r.stock).unwrap_or(0);
        Self::from_catalog(entry, stock)
    }

    /// Join a catalog entry with the record an inventory write echoed back.
    /// Identity and stock come from the inventory response.
    pub fn from_stock_write(entry: CatalogEntry, written: StockRecord) -> Self {
        Self {
            id: Some(written.id),
            name: entry.product_name,
            code: entry.code,
            stock: Some(written.stock),
            message: None,
        }
    }

    /// A deletion acknowledgement: only `message` is populated.
    pub fn deleted(ack: DeletionAck) -> Self {
        Self {
            message: ack.message,
            ..Self::default()
        }
    }
}

/// Join a catalog listing against every known stock record.
///
/// Output order is the catalog's order.
pub fn merge_listing(catalog: Vec<CatalogEntry>, stock: &StockIndex) -> Vec<Product> {
    catalog
        .into_iter()
        .map(|entry| {
            let count = stock.stock_of(entry.id);
            Product::from_catalog(entry, count)
        })
        .collect()
}
