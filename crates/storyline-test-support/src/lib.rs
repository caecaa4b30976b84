//! Shared test fakes and fixtures for Storyline.

mod clock;
mod fixtures;
mod rng;

pub use clock::FixedClock;
pub use fixtures::{fixture_catalog, fixture_time};
pub use rng::{MockRng, SequenceRng};
