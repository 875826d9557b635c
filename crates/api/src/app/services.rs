//! Aggregation service: joins catalog entries with inventory stock.
//!
//! Every operation is a short linear sequence: issue upstream call(s), decode,
//! merge, return. Reads with no data dependency between them run
//! concurrently; everything else is awaited in order. Nothing is cached and
//! nothing is retried: the first upstream failure aborts the operation.

use std::sync::Arc;

use tracing::instrument;

use shelfgate_core::{GatewayError, GatewayResult, ProductId};
use shelfgate_infra::{
    CatalogClient, CatalogQuery, HttpCatalogClient, HttpInventoryClient, InventoryClient,
    build_http_client,
};
use shelfgate_inventory::{NewStockRecord, StockIndex, StockUpdate};
use shelfgate_products::{CatalogEntry, DecrementPolicy, Product, merge_listing};

use crate::config::GatewayConfig;

pub struct ProductService {
    catalog: Arc<dyn CatalogClient>,
    inventory: Arc<dyn InventoryClient>,
    decrement_policy: DecrementPolicy,
}

impl ProductService {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        inventory: Arc<dyn InventoryClient>,
        decrement_policy: DecrementPolicy,
    ) -> Self {
        Self {
            catalog,
            inventory,
            decrement_policy,
        }
    }

    /// Wire HTTP clients for both upstreams (sharing one connection pool).
    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let http = build_http_client(config.upstream_timeout)?;
        let catalog = HttpCatalogClient::new(config.catalog_url.clone(), http.clone());
        let inventory = HttpInventoryClient::new(config.inventory_url.clone(), http);

        tracing::info!(
            catalog = catalog.base_url(),
            inventory = inventory.base_url(),
            decrement_policy = %config.decrement_policy,
            "upstreams configured"
        );

        Ok(Self::new(Arc::new(catalog), Arc::new(inventory), config.decrement_policy))
    }

    /// Every catalog product with its stock (0 when the inventory has none),
    /// in catalog order.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_products(&self) -> GatewayResult<Vec<Product>> {
        let query = CatalogQuery::All;
        let (page, stock) = tokio::try_join!(self.catalog.search(&query), self.inventory.list())?;
        Ok(merge_listing(page.products, &StockIndex::new(stock)))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn product_by_id(&self, id: ProductId) -> GatewayResult<Product> {
        let (entry, record) = tokio::try_join!(self.catalog_entry(id), self.inventory.get(id))?;
        Ok(Product::from_lookup(entry, record))
    }

    /// The stock lookup needs the id of the top search hit, so the two calls
    /// are sequential.
    #[instrument(level = "debug", skip(self))]
    pub async fn product_by_name(&self, name: &str) -> GatewayResult<Product> {
        let terms = name.trim();
        if terms.is_empty() {
            return Err(GatewayError::invalid_input("name cannot be empty"));
        }

        let entry = self
            .catalog
            .search(&CatalogQuery::FullText(terms.to_string()))
            .await?
            .into_first()
            .ok_or_else(|| GatewayError::not_found(format!("no catalog product matches {terms:?}")))?;

        let record = self.inventory.get(entry.id).await?;
        Ok(Product::from_lookup(entry, record))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn insert_product(&self, id: ProductId, stock: i64) -> GatewayResult<Product> {
        let entry = self.catalog_entry(id).await?;
        let written = self.inventory.insert(&NewStockRecord { id, stock }).await?;
        Ok(Product::from_stock_write(entry, written))
    }

    /// Sets the stock of `id` to `quantity`. The value replaces the stored
    /// count; it is not added to it. Validating the value is left to the
    /// inventory service.
    #[instrument(level = "debug", skip(self))]
    pub async fn increment_product(&self, id: ProductId, quantity: i64) -> GatewayResult<Product> {
        let entry = self.catalog_entry(id).await?;
        self.write_stock(entry, id, quantity).await
    }

    /// Under [`DecrementPolicy::MirrorIncrement`] this is indistinguishable
    /// from [`ProductService::increment_product`].
    #[instrument(level = "debug", skip(self))]
    pub async fn decrement_product(&self, id: ProductId, quantity: i64) -> GatewayResult<Product> {
        let (entry, current) = if self.decrement_policy.needs_current_stock() {
            let (entry, record) = tokio::try_join!(self.catalog_entry(id), self.inventory.get(id))?;
            (entry, record.map(|r| r.stock).unwrap_or(0))
        } else {
            (self.catalog_entry(id).await?, 0)
        };

        let target = self.decrement_policy.target_stock(id, current, quantity)?;
        self.write_stock(entry, id, target).await
    }

    /// The catalog lookup only verifies the upstream is answering; an empty
    /// result does not block the deletion.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> GatewayResult<Product> {
        let page = self.catalog.search(&CatalogQuery::ByCode(id)).await?;
        if page.is_empty() {
            tracing::debug!(%id, "deleting stock for a product the catalog does not know");
        }

        let ack = self.inventory.delete(id).await?;
        Ok(Product::deleted(ack))
    }

    /// The top catalog hit whose barcode equals `id`.
    async fn catalog_entry(&self, id: ProductId) -> GatewayResult<CatalogEntry> {
        self.catalog
            .search(&CatalogQuery::ByCode(id))
            .await?
            .into_first()
            .ok_or_else(|| GatewayError::not_found(format!("no catalog product with code {id}")))
    }

    async fn write_stock(&self, entry: CatalogEntry, id: ProductId, stock: i64) -> GatewayResult<Product> {
        let written = self.inventory.set_stock(id, StockUpdate { stock }).await?;
        Ok(Product::from_stock_write(entry, written))
    }
}
