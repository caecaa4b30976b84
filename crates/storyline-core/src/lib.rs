//! Storyline Core — shared abstractions.
//!
//! Time, randomness, errors and playback event metadata used by the catalog
//! and player crates. Nothing here touches I/O.

pub mod clock;
pub mod error;
pub mod event;
pub mod rng;
