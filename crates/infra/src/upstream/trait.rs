use async_trait::async_trait;

use shelfgate_core::{GatewayResult, ProductId};
use shelfgate_inventory::{DeletionAck, NewStockRecord, StockRecord, StockUpdate};
use shelfgate_products::CatalogPage;

/// What to ask the catalog for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Every product the catalog's default search returns.
    All,
    /// Products whose barcode equals the given id.
    ByCode(ProductId),
    /// Free-text search over product names.
    FullText(String),
}

/// Read-only product catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Run a search. Result order is the catalog's ranking.
    async fn search(&self, query: &CatalogQuery) -> GatewayResult<CatalogPage>;
}

/// Read/write store of per-product stock counts.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// All stock records.
    async fn list(&self) -> GatewayResult<Vec<StockRecord>>;

    /// A single stock record; `None` when the inventory has no record for `id`.
    async fn get(&self, id: ProductId) -> GatewayResult<Option<StockRecord>>;

    /// Create a stock record, returning the stored record.
    async fn insert(&self, record: &NewStockRecord) -> GatewayResult<StockRecord>;

    /// Replace the stock count of `id`, returning the stored record.
    async fn set_stock(&self, id: ProductId, update: StockUpdate) -> GatewayResult<StockRecord>;

    /// Remove the stock record of `id`.
    async fn delete(&self, id: ProductId) -> GatewayResult<DeletionAck>;
}
