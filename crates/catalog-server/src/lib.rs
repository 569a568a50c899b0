//! # Catalog Server Library
//!
//! Wires configuration, the PostgreSQL pool, the Redis cache and the HTTP
//! router into a running server.

pub mod app;
pub mod startup;
