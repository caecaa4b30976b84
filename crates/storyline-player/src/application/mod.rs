//! Session wiring: ticker, command handlers and queries.

pub mod command_handlers;
pub mod query_handlers;
pub mod session;
mod ticker;
