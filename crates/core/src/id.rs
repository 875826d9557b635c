//! Product identifier with numeric coercion.
//!
//! The catalog and the inventory service disagree on how they spell an id:
//! one sends `"7"`, the other `7`. Both are decoded into the same canonical
//! [`ProductId`], so joins compare numbers, never JSON representations.
//!
//! Barcodes are keyed by their text upstream, so an id also remembers how
//! many leading zeros it was written with. [`Display`](core::fmt::Display)
//! restores them; equality and hashing ignore them.

use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GatewayError;

/// Canonical product identifier shared by both upstreams.
#[derive(Debug, Copy, Clone)]
pub struct ProductId {
    value: u64,
    leading_zeros: u8,
}

impl ProductId {
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            leading_zeros: 0,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl PartialEq for ProductId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ProductId {}

impl Hash for ProductId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl core::fmt::Display for ProductId {
    /// The id as its upstream key, leading zeros included.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for _ in 0..self.leading_zeros {
            f.write_str("0")?;
        }
        core::fmt::Display::fmt(&self.value, f)
    }
}

impl FromStr for ProductId {
    type Err = GatewayError;

    /// Accepts a decimal integer, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GatewayError::invalid_input(format!(
                "product id must be a non-negative integer, got {s:?}"
            )));
        }
        let value = trimmed
            .parse::<u64>()
            .map_err(|e| GatewayError::invalid_input(format!("product id {s:?}: {e}")))?;
        // "000" is value 0 written with two extra zeros.
        let significant = value.to_string().len();
        let leading_zeros = u8::try_from(trimmed.len() - significant)
            .map_err(|_| GatewayError::invalid_input(format!("product id {s:?} is too long")))?;
        Ok(Self {
            value,
            leading_zeros,
        })
    }
}

/// Serializes as the upstream key string, so leading zeros survive.
impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ProductIdVisitor)
    }
}

struct ProductIdVisitor;

impl Visitor<'_> for ProductIdVisitor {
    type Value = ProductId;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a non-negative integer or a string containing one")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ProductId::new(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(ProductId::new)
            .map_err(|_| E::custom(format!("negative product id {v}")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
            Ok(ProductId::new(v as u64))
        } else {
            Err(E::custom(format!("product id {v} is not a whole number")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<ProductId>().map_err(E::custom)
    }
}
