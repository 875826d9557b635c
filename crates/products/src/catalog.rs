use serde::{Deserialize, Deserializer};

use shelfgate_core::ProductId;

/// One product as described by the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
}

impl CatalogEntry {
    pub fn new(id: ProductId, code: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            id,
            code: Some(code.into()),
            product_name: Some(product_name.into()),
        }
    }
}

/// A page of catalog search results, in the order the catalog ranked them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub products: Vec<CatalogEntry>,
}

impl CatalogPage {
    pub fn new(products: Vec<CatalogEntry>) -> Self {
        Self { products }
    }

    /// The top-ranked entry, if the search matched anything.
    pub fn into_first(self) -> Option<CatalogEntry> {
        self.products.into_iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Barcodes occasionally arrive as bare numbers.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Unsigned(n) => n.to_string(),
        Raw::Signed(n) => n.to_string(),
    }))
}
