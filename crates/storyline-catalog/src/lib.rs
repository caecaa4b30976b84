//! Storyline — Story Catalog.
//!
//! Profiles, story posts and the story line built from them, plus the
//! sources that produce a validated [`domain::catalog::Catalog`] once at
//! startup.

pub mod application;
pub mod domain;
