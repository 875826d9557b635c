//! GraphQL gateway: configuration, aggregation service and HTTP surface.

pub mod app;
pub mod config;
