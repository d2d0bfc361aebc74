//! HTTP surface for the vinea platform.
//!
//! Thin glue over the core engine: route definitions, error mapping
//! and server configuration. Domain logic lives in `vinea-core`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
