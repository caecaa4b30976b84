//! Catalog sources and read-only views.

pub mod generator;
pub mod query_handlers;
pub mod sources;
