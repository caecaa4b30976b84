//! The validated, read-only catalog.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storyline_core::error::DomainError;

use super::profile::{Profile, UserId};
use super::story::StoryLine;

/// Raw catalog document as produced by a source, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// All known profiles.
    pub profiles: Vec<Profile>,
    /// The story line to play.
    pub story_line: StoryLine,
}

/// Profiles and the story line, checked against every story line invariant.
///
/// Construction is the only validation point: once a `Catalog` exists the
/// player can index into it without further checks.
#[derive(Debug, Clone, Serialize)]
#[serde(into = "CatalogDocument")]
pub struct Catalog {
    profiles: Vec<Profile>,
    by_id: HashMap<UserId, usize>,
    story_line: Arc<StoryLine>,
}

impl Catalog {
    /// Validates and assembles a catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` naming the first broken
    /// invariant.
    pub fn new(profiles: Vec<Profile>, story_line: StoryLine) -> Result<Self, DomainError> {
        let mut by_id = HashMap::with_capacity(profiles.len());
        for (position, profile) in profiles.iter().enumerate() {
            if by_id.insert(profile.user_id.clone(), position).is_some() {
                return Err(violation(format!(
                    "duplicate profile id {}",
                    profile.user_id
                )));
            }
        }

        if !by_id.contains_key(&story_line.focus_user) {
            return Err(violation(format!(
                "focus user {} has no profile",
                story_line.focus_user
            )));
        }

        let mut seen_authors = HashSet::new();
        for (index, collection) in story_line.collections.iter().enumerate() {
            if !by_id.contains_key(&collection.author) {
                return Err(violation(format!(
                    "collection {index} author {} has no profile",
                    collection.author
                )));
            }
            if !seen_authors.insert(&collection.author) {
                return Err(violation(format!(
                    "author {} appears in more than one collection",
                    collection.author
                )));
            }
            if collection.is_empty() {
                return Err(violation(format!(
                    "collection {index} for {} has no posts",
                    collection.author
                )));
            }
            for (post_index, post) in collection.posts.iter().enumerate() {
                if post.author != collection.author {
                    return Err(violation(format!(
                        "post {post_index} in collection {index} is authored by {}, expected {}",
                        post.author, collection.author
                    )));
                }
                if let Some(viewer) = post.viewed_by.iter().find(|id| !by_id.contains_key(*id)) {
                    return Err(violation(format!(
                        "post {post_index} in collection {index} viewed by unknown user {viewer}"
                    )));
                }
                if let Some(reaction) = post
                    .reactions
                    .iter()
                    .find(|reaction| !by_id.contains_key(&reaction.user_id))
                {
                    return Err(violation(format!(
                        "post {post_index} in collection {index} has reaction from unknown user {}",
                        reaction.user_id
                    )));
                }
            }
        }

        Ok(Self {
            profiles,
            by_id,
            story_line: Arc::new(story_line),
        })
    }

    /// All profiles, in source order.
    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// The validated story line.
    #[must_use]
    pub fn story_line(&self) -> &StoryLine {
        &self.story_line
    }

    /// A shared handle to the story line, for owners that outlive a borrow.
    #[must_use]
    pub fn shared_story_line(&self) -> Arc<StoryLine> {
        Arc::clone(&self.story_line)
    }

    /// Looks up a profile by id.
    #[must_use]
    pub fn profile(&self, user_id: &UserId) -> Option<&Profile> {
        self.by_id.get(user_id).map(|&position| &self.profiles[position])
    }

    /// Avatar URL for a user, if the profile exists.
    #[must_use]
    pub fn avatar_for(&self, user_id: &UserId) -> Option<&str> {
        self.profile(user_id).map(|profile| profile.avatar_url.as_str())
    }
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = DomainError;

    fn try_from(document: CatalogDocument) -> Result<Self, Self::Error> {
        Self::new(document.profiles, document.story_line)
    }
}

impl From<Catalog> for CatalogDocument {
    fn from(catalog: Catalog) -> Self {
        Self {
            profiles: catalog.profiles,
            story_line: Arc::unwrap_or_clone(catalog.story_line),
        }
    }
}

fn violation(message: String) -> DomainError {
    DomainError::InvariantViolation(message)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::story::{MediaType, Reaction, ReactionKind, StoryPost, UserStoryCollection};

    fn profile(id: &str) -> Profile {
        Profile {
            user_id: UserId::from(id),
            username: format!("{id}_name"),
            avatar_url: format!("https://avatars.example/{id}.png"),
            has_stories: true,
        }
    }

    fn post(author: &str) -> StoryPost {
        StoryPost {
            author: UserId::from(author),
            media_type: MediaType::Image,
            content_url: "https://picsum.photos/300/400".to_owned(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            viewed_by: BTreeSet::new(),
            reactions: Vec::new(),
        }
    }

    fn line(collections: Vec<UserStoryCollection>) -> StoryLine {
        StoryLine {
            focus_user: UserId::from("alice"),
            collections,
        }
    }

    fn collection(author: &str, posts: usize) -> UserStoryCollection {
        UserStoryCollection {
            author: UserId::from(author),
            posts: (0..posts).map(|_| post(author)).collect(),
        }
    }

    fn expect_violation(result: Result<Catalog, DomainError>, fragment: &str) {
        match result {
            Err(DomainError::InvariantViolation(message)) => {
                assert!(message.contains(fragment), "unexpected message: {message}");
            }
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_new_accepts_consistent_catalog() {
        // Arrange
        let profiles = vec![profile("alice"), profile("bob")];
        let mut first = post("bob");
        first.viewed_by.insert(UserId::from("alice"));
        first.reactions.push(Reaction {
            user_id: UserId::from("alice"),
            kind: ReactionKind::Fire,
        });
        let story_line = line(vec![UserStoryCollection {
            author: UserId::from("bob"),
            posts: vec![first],
        }]);

        // Act
        let catalog = Catalog::new(profiles, story_line).unwrap();

        // Assert
        assert_eq!(catalog.story_line().len(), 1);
        assert_eq!(
            catalog.avatar_for(&UserId::from("bob")),
            Some("https://avatars.example/bob.png")
        );
        assert!(catalog.profile(&UserId::from("carol")).is_none());
    }

    #[test]
    fn test_shared_story_line_is_not_copied() {
        let story_line = line(vec![UserStoryCollection {
            author: UserId::from("bob"),
            posts: vec![post("bob")],
        }]);
        let catalog = Catalog::new(vec![profile("alice"), profile("bob")], story_line).unwrap();

        let shared = catalog.shared_story_line();

        assert!(std::ptr::eq(shared.as_ref(), catalog.story_line()));
        assert_eq!(Arc::strong_count(&shared), 2);
    }

    #[test]
    fn test_new_rejects_duplicate_profile_ids() {
        let result = Catalog::new(vec![profile("alice"), profile("alice")], line(vec![]));

        expect_violation(result, "duplicate profile id alice");
    }

    #[test]
    fn test_new_rejects_unknown_focus_user() {
        let result = Catalog::new(vec![profile("bob")], line(vec![]));

        expect_violation(result, "focus user alice");
    }

    #[test]
    fn test_new_rejects_collection_without_posts() {
        let result = Catalog::new(
            vec![profile("alice"), profile("bob")],
            line(vec![collection("bob", 0)]),
        );

        expect_violation(result, "has no posts");
    }

    #[test]
    fn test_new_rejects_collection_with_unknown_author() {
        let result = Catalog::new(vec![profile("alice")], line(vec![collection("zed", 1)]));

        expect_violation(result, "author zed has no profile");
    }

    #[test]
    fn test_new_rejects_duplicate_collection_author() {
        let result = Catalog::new(
            vec![profile("alice")],
            line(vec![collection("alice", 1), collection("alice", 2)]),
        );

        expect_violation(result, "more than one collection");
    }

    #[test]
    fn test_new_rejects_post_from_other_author() {
        let result = Catalog::new(
            vec![profile("alice"), profile("bob")],
            line(vec![UserStoryCollection {
                author: UserId::from("bob"),
                posts: vec![post("alice")],
            }]),
        );

        expect_violation(result, "expected bob");
    }

    #[test]
    fn test_new_rejects_unknown_viewer_and_reactor() {
        let profiles = vec![profile("alice"), profile("bob")];

        let mut viewed = post("bob");
        viewed.viewed_by.insert(UserId::from("ghost"));
        let result = Catalog::new(
            profiles.clone(),
            line(vec![UserStoryCollection {
                author: UserId::from("bob"),
                posts: vec![viewed],
            }]),
        );
        expect_violation(result, "viewed by unknown user ghost");

        let mut reacted = post("bob");
        reacted.reactions.push(Reaction {
            user_id: UserId::from("ghost"),
            kind: ReactionKind::Cry,
        });
        let result = Catalog::new(
            profiles,
            line(vec![UserStoryCollection {
                author: UserId::from("bob"),
                posts: vec![reacted],
            }]),
        );
        expect_violation(result, "reaction from unknown user ghost");
    }

    #[test]
    fn test_catalog_serializes_as_document() {
        let catalog = Catalog::new(
            vec![profile("alice")],
            line(vec![collection("alice", 2)]),
        )
        .unwrap();

        let json = serde_json::to_value(&catalog).unwrap();
        let document: CatalogDocument = serde_json::from_value(json).unwrap();
        let restored = Catalog::try_from(document).unwrap();

        assert_eq!(restored.story_line(), catalog.story_line());
        assert_eq!(restored.profiles(), catalog.profiles());
    }
}
