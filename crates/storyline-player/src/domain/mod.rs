//! Playback state machines and their events.

pub mod commands;
pub mod config;
pub mod events;
pub mod player;
pub mod progress;
pub mod story_line;
