use std::sync::RwLock;

use async_trait::async_trait;

use shelfgate_core::{GatewayError, GatewayResult, ProductId, UpstreamService};
use shelfgate_inventory::{DeletionAck, NewStockRecord, StockRecord, StockUpdate};
use shelfgate_products::{CatalogEntry, CatalogPage};

use super::r#trait::{CatalogClient, CatalogQuery, InventoryClient};

/// In-memory catalog.
///
/// Intended for tests/dev. Searches scan every entry; `ByCode` compares the
/// barcode text exactly, like the real catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    entries: RwLock<Vec<CatalogEntry>>,
    queries: RwLock<Vec<CatalogQuery>>,
}

impl InMemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            queries: RwLock::default(),
        }
    }

    /// Every query served so far, oldest first.
    pub fn queries(&self) -> Vec<CatalogQuery> {
        self.queries.read().map(|q| q.clone()).unwrap_or_default()
    }

    fn matches(entry: &CatalogEntry, query: &CatalogQuery) -> bool {
        match query {
            CatalogQuery::All => true,
            CatalogQuery::ByCode(id) => entry.code.as_deref() == Some(id.to_string().as_str()),
            CatalogQuery::FullText(terms) => {
                let terms = terms.to_lowercase();
                entry
                    .product_name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&terms))
            }
        }
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalog {
    async fn search(&self, query: &CatalogQuery) -> GatewayResult<CatalogPage> {
        if let Ok(mut queries) = self.queries.write() {
            queries.push(query.clone());
        }
        let entries = self
            .entries
            .read()
            .map_err(|_| GatewayError::transport(UpstreamService::Catalog, "lock poisoned"))?;
        Ok(CatalogPage::new(
            entries
                .iter()
                .filter(|e| Self::matches(e, query))
                .cloned()
                .collect(),
        ))
    }
}

/// In-memory stock store, listing records in insertion order.
///
/// Intended for tests/dev. Mirrors the HTTP inventory: records are keyed by
/// the id's text, duplicate inserts answer 409, writes to unknown ids
/// answer 404.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    records: RwLock<Vec<StockRecord>>,
}

impl InMemoryInventory {
    pub fn new(records: Vec<StockRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Current stock of `id`, bypassing the client interface.
    pub fn stock_of(&self, id: ProductId) -> Option<i64> {
        self.records
            .read()
            .ok()?
            .iter()
            .find(|r| Self::same_key(r.id, id))
            .map(|r| r.stock)
    }

    fn same_key(a: ProductId, b: ProductId) -> bool {
        a.to_string() == b.to_string()
    }

    fn poisoned() -> GatewayError {
        GatewayError::transport(UpstreamService::Inventory, "lock poisoned")
    }

    fn missing(id: ProductId) -> GatewayError {
        GatewayError::Upstream {
            service: UpstreamService::Inventory,
            status: 404,
            body: format!("product {id} not found"),
        }
    }
}

#[async_trait]
impl InventoryClient for InMemoryInventory {
    async fn list(&self) -> GatewayResult<Vec<StockRecord>> {
        Ok(self.records.read().map_err(|_| Self::poisoned())?.clone())
    }

    async fn get(&self, id: ProductId) -> GatewayResult<Option<StockRecord>> {
        let records = self.records.read().map_err(|_| Self::poisoned())?;
        Ok(records.iter().find(|r| Self::same_key(r.id, id)).cloned())
    }

    async fn insert(&self, record: &NewStockRecord) -> GatewayResult<StockRecord> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        if records.iter().any(|r| Self::same_key(r.id, record.id)) {
            return Err(GatewayError::Upstream {
                service: UpstreamService::Inventory,
                status: 409,
                body: format!("product {} already exists", record.id),
            });
        }
        let stored = StockRecord::new(record.id, record.stock);
        records.push(stored.clone());
        Ok(stored)
    }

    async fn set_stock(&self, id: ProductId, update: StockUpdate) -> GatewayResult<StockRecord> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let record = records
            .iter_mut()
            .find(|r| Self::same_key(r.id, id))
            .ok_or_else(|| Self::missing(id))?;
        record.stock = update.stock;
        Ok(record.clone())
    }

    async fn delete(&self, id: ProductId) -> GatewayResult<DeletionAck> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let before = records.len();
        records.retain(|r| !Self::same_key(r.id, id));
        if records.len() == before {
            return Err(Self::missing(id));
        }
        Ok(DeletionAck {
            message: Some(format!("Product {id} deleted")),
        })
    }
}
