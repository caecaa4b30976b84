//! User profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque user identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps a raw identifier.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A user shown in the story strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier.
    pub user_id: UserId,
    /// Display name.
    pub username: String,
    /// Avatar image URL.
    pub avatar_url: String,
    /// Whether the user currently has stories.
    pub has_stories: bool,
}
