//! Stock adjustment rules.
//!
//! Both adjustment mutations send an absolute stock value to the inventory
//! service. What `decrement_product` sends depends on [`DecrementPolicy`]:
//! historically it sent the requested quantity unchanged, exactly like
//! `increment_product`, and that remains the default.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use shelfgate_core::{GatewayError, GatewayResult, ProductId};

/// How `decrement_product` turns a quantity into the stock value it writes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecrementPolicy {
    /// Write `quantity` as the new stock, same as increment.
    #[default]
    MirrorIncrement,
    /// Write `current - quantity`, refusing to go below zero.
    Subtract,
}

impl DecrementPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecrementPolicy::MirrorIncrement => "mirror_increment",
            DecrementPolicy::Subtract => "subtract",
        }
    }

    /// Whether computing the target needs the product's current stock.
    pub fn needs_current_stock(&self) -> bool {
        matches!(self, DecrementPolicy::Subtract)
    }

    /// The absolute stock value to write for a decrement of `quantity`.
    ///
    /// `current` is ignored under [`DecrementPolicy::MirrorIncrement`].
    pub fn target_stock(&self, id: ProductId, current: i64, quantity: i64) -> GatewayResult<i64> {
        match self {
            DecrementPolicy::MirrorIncrement => Ok(quantity),
            DecrementPolicy::Subtract => {
                let target = current.checked_sub(quantity).unwrap_or(i64::MIN);
                if target < 0 {
                    return Err(GatewayError::InsufficientStock {
                        id,
                        available: current,
                        requested: quantity,
                    });
                }
                Ok(target)
            }
        }
    }
}

impl FromStr for DecrementPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mirror_increment" | "mirror" => Ok(DecrementPolicy::MirrorIncrement),
            "subtract" => Ok(DecrementPolicy::Subtract),
            other => Err(format!(
                "unknown decrement policy {other:?} (expected mirror_increment or subtract)"
            )),
        }
    }
}

impl core::fmt::Display for DecrementPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
