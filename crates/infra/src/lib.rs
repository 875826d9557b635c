//! Infrastructure layer: clients for the catalog and inventory upstreams.

pub mod upstream;

pub use upstream::{
    CatalogClient, CatalogQuery, HttpCatalogClient, HttpInventoryClient, InMemoryCatalog,
    InMemoryInventory, InventoryClient, build_http_client,
};
