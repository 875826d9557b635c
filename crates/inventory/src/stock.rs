use std::collections::HashMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use shelfgate_core::ProductId;

/// A per-product stock count as owned by the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: ProductId,
    /// Numeric strings and whole floats are accepted; anything else counts as zero.
    #[serde(default, deserialize_with = "lenient_stock")]
    pub stock: i64,
}

impl StockRecord {
    pub fn new(id: ProductId, stock: i64) -> Self {
        Self { id, stock }
    }
}

fn lenient_stock<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(n)) => n,
        Some(Raw::Float(f)) => whole(f).unwrap_or(0),
        Some(Raw::Text(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
                .unwrap_or(0)
        }
        Some(Raw::Other(IgnoredAny)) | None => 0,
    })
}

fn whole(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64)
        .then_some(f as i64)
}

/// Body of `POST /api/products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockRecord {
    pub id: ProductId,
    pub stock: i64,
}

/// Body of `PUT /api/products/stock/{id}`. The value replaces the stored count.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub stock: i64,
}

/// Acknowledgement returned by `DELETE /api/products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// Stock counts keyed by canonical id, for joining a full listing.
///
/// When the inventory lists the same id twice, the first record wins.
#[derive(Debug, Clone, Default)]
pub struct StockIndex {
    by_id: HashMap<ProductId, i64>,
}

impl StockIndex {
    pub fn new(records: impl IntoIterator<Item = StockRecord>) -> Self {
        let mut by_id = HashMap::new();
        for record in records {
            by_id.entry(record.id).or_insert(record.stock);
        }
        Self { by_id }
    }

    /// Stock for `id`, or zero when the inventory has no record of it.
    pub fn stock_of(&self, id: ProductId) -> i64 {
        self.by_id.get(&id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }
}
