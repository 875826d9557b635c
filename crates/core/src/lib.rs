//! `shelfgate-core` : identifiers and the error model shared by every layer.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP).

pub mod error;
pub mod id;

pub use error::{GatewayError, GatewayResult, UpstreamService};
pub use id::ProductId;
