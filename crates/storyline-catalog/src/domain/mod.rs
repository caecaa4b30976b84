//! Catalog domain model.

pub mod catalog;
pub mod profile;
pub mod story;
