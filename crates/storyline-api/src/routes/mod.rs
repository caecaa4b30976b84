//! Route modules: the avatar strip and the player overlay.

pub mod health;
pub mod player;
pub mod story_line;
