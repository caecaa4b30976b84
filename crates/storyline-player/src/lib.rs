//! Storyline — playback engine.
//!
//! The story line (avatar strip) owns a story player that sequences one
//! user's posts under a cancellable fixed-rate ticker. Completion of an
//! activation flows back to the story line, which closes the overlay.

pub mod application;
pub mod domain;
