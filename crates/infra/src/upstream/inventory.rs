//! Inventory client for the local stock service's REST API.

use async_trait::async_trait;

use shelfgate_core::{GatewayResult, ProductId, UpstreamService};
use shelfgate_inventory::{DeletionAck, NewStockRecord, StockRecord, StockUpdate};

use super::http::Upstream;
use super::r#trait::InventoryClient;

/// reqwest-backed [`InventoryClient`].
///
/// Routes:
/// - `GET    /api/products`
/// - `GET    /api/products/{id}`
/// - `POST   /api/products`
/// - `PUT    /api/products/stock/{id}`
/// - `DELETE /api/products/{id}`
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    upstream: Upstream,
}

impl HttpInventoryClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            upstream: Upstream::new(UpstreamService::Inventory, base_url, client),
        }
    }

    pub fn base_url(&self) -> &str {
        self.upstream.base_url()
    }

    fn record_url(&self, id: ProductId) -> String {
        self.upstream.url(&format!("/api/products/{id}"))
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn list(&self) -> GatewayResult<Vec<StockRecord>> {
        let req = self.upstream.client().get(self.upstream.url("/api/products"));
        self.upstream.fetch(req).await
    }

    async fn get(&self, id: ProductId) -> GatewayResult<Option<StockRecord>> {
        let req = self.upstream.client().get(self.record_url(id));
        self.upstream.fetch_optional(req).await
    }

    async fn insert(&self, record: &NewStockRecord) -> GatewayResult<StockRecord> {
        let req = self
            .upstream
            .client()
            .post(self.upstream.url("/api/products"))
            .json(record);
        self.upstream.fetch(req).await
    }

    async fn set_stock(&self, id: ProductId, update: StockUpdate) -> GatewayResult<StockRecord> {
        let req = self
            .upstream
            .client()
            .put(self.upstream.url(&format!("/api/products/stock/{id}")))
            .json(&update);
        self.upstream.fetch(req).await
    }

    async fn delete(&self, id: ProductId) -> GatewayResult<DeletionAck> {
        let req = self.upstream.client().delete(self.record_url(id));
        self.upstream.fetch(req).await
    }
}
