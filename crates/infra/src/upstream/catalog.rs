//! Catalog client speaking the Open Food Facts search API.

use async_trait::async_trait;

use shelfgate_core::{GatewayResult, UpstreamService};
use shelfgate_products::CatalogPage;

use super::http::Upstream;
use super::r#trait::{CatalogClient, CatalogQuery};

/// Fields requested from every catalog search.
const FIELDS: &str = "id,code,product_name";

/// reqwest-backed [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    upstream: Upstream,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            upstream: Upstream::new(UpstreamService::Catalog, base_url, client),
        }
    }

    pub fn base_url(&self) -> &str {
        self.upstream.base_url()
    }

    fn request(&self, query: &CatalogQuery) -> reqwest::RequestBuilder {
        let client = self.upstream.client();
        match query {
            CatalogQuery::All => client
                .get(self.upstream.url("/api/v2/search"))
                .query(&[("fields", FIELDS)]),
            CatalogQuery::ByCode(id) => {
                let code = id.to_string();
                client
                    .get(self.upstream.url("/api/v2/search"))
                    .query(&[("fields", FIELDS), ("code", code.as_str())])
            }
            CatalogQuery::FullText(terms) => client
                .get(self.upstream.url("/cgi/search.pl"))
                .query(&[
                    ("search_terms", terms.as_str()),
                    ("action", "process"),
                    ("fields", FIELDS),
                    ("json", "1"),
                ]),
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search(&self, query: &CatalogQuery) -> GatewayResult<CatalogPage> {
        self.upstream.fetch(self.request(query)).await
    }
}
