//! Gateway error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the gateway.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// The upstream an error originated from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamService {
    Catalog,
    Inventory,
}

impl UpstreamService {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamService::Catalog => "catalog",
            UpstreamService::Inventory => "inventory",
        }
    }
}

impl core::fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request-level failure of a gateway operation.
///
/// Nothing in the gateway recovers from these locally: every variant aborts
/// the operation and is surfaced to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The catalog returned no entry where exactly one was required.
    #[error("not found: {0}")]
    NotFound(String),

    /// An upstream answered with a non-success status.
    #[error("{service} service returned {status}: {body}")]
    Upstream {
        service: UpstreamService,
        status: u16,
        body: String,
    },

    /// An upstream could not be reached (connect failure, timeout, IO).
    #[error("{service} service unavailable: {message}")]
    Transport {
        service: UpstreamService,
        message: String,
    },

    /// An upstream answered with a body that could not be decoded.
    #[error("{service} service returned malformed data: {message}")]
    Decode {
        service: UpstreamService,
        message: String,
    },

    /// A caller-supplied argument was rejected before any upstream call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A subtracting decrement would take stock below zero.
    #[error("insufficient stock for product {id}: available {available}, requested {requested}")]
    InsufficientStock {
        id: ProductId,
        available: i64,
        requested: i64,
    },
}

impl GatewayError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn transport(service: UpstreamService, msg: impl Into<String>) -> Self {
        Self::Transport {
            service,
            message: msg.into(),
        }
    }

    pub fn decode(service: UpstreamService, msg: impl Into<String>) -> Self {
        Self::Decode {
            service,
            message: msg.into(),
        }
    }

    /// Stable machine-readable code, exposed to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::NotFound(_) => "NOT_FOUND",
            GatewayError::Upstream { .. } => "UPSTREAM_ERROR",
            GatewayError::Transport { .. } => "UPSTREAM_UNAVAILABLE",
            GatewayError::Decode { .. } => "UPSTREAM_DECODE",
            GatewayError::InvalidInput(_) => "BAD_USER_INPUT",
            GatewayError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
        }
    }
}
