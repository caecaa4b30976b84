//! Story posts, per-user collections and the story line.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::UserId;

/// Kind of media a story post carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// A still image.
    Image,
    /// A video clip.
    Video,
}

/// The closed set of reactions a viewer can leave on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Laugh,
    Wonder,
    Clap,
    Love,
    Fire,
    Cry,
}

impl ReactionKind {
    /// Every reaction kind, in display order.
    pub const ALL: [ReactionKind; 7] = [
        ReactionKind::Like,
        ReactionKind::Laugh,
        ReactionKind::Wonder,
        ReactionKind::Clap,
        ReactionKind::Love,
        ReactionKind::Fire,
        ReactionKind::Cry,
    ];

    /// Returns the lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Laugh => "laugh",
            ReactionKind::Wonder => "wonder",
            ReactionKind::Clap => "clap",
            ReactionKind::Love => "love",
            ReactionKind::Fire => "fire",
            ReactionKind::Cry => "cry",
        }
    }
}

/// One viewer's reaction to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// The reacting user.
    pub user_id: UserId,
    /// What they reacted with.
    pub kind: ReactionKind,
}

/// A single timed media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPost {
    /// The posting user.
    pub author: UserId,
    /// Image or video.
    pub media_type: MediaType,
    /// Media URL.
    pub content_url: String,
    /// When the post was published.
    pub created_at: DateTime<Utc>,
    /// Users who have seen the post.
    #[serde(default)]
    pub viewed_by: BTreeSet<UserId>,
    /// Reactions, in the order they were left.
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

/// A user's posts in playback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStoryCollection {
    /// The posting user.
    pub author: UserId,
    /// Posts, oldest first. Index is playback order.
    pub posts: Vec<StoryPost>,
}

impl UserStoryCollection {
    /// Number of posts in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Returns `true` when the collection has no posts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// The avatar strip: one collection per user with at least one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryLine {
    /// The user the strip is rendered for.
    pub focus_user: UserId,
    /// Collections in strip order.
    pub collections: Vec<UserStoryCollection>,
}

impl StoryLine {
    /// Number of collections in the strip.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Returns `true` when nobody has stories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Returns the collection at `index`, if any.
    #[must_use]
    pub fn collection(&self, index: usize) -> Option<&UserStoryCollection> {
        self.collections.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_kinds_serialize_lowercase() {
        let names: Vec<String> = ReactionKind::ALL
            .iter()
            .map(|kind| serde_json::to_value(kind).unwrap().as_str().unwrap().to_owned())
            .collect();

        assert_eq!(
            names,
            vec!["like", "laugh", "wonder", "clap", "love", "fire", "cry"]
        );
        for kind in ReactionKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }

    #[test]
    fn test_unknown_reaction_kind_is_rejected() {
        let result: Result<ReactionKind, _> = serde_json::from_str("\"angry\"");

        assert!(result.is_err());
    }
}
