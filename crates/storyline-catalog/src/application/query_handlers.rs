//! Read-only views over the catalog.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use storyline_core::error::DomainError;

use crate::domain::catalog::Catalog;
use crate::domain::profile::UserId;
use crate::domain::story::{MediaType, ReactionKind};

/// One avatar in the strip.
#[derive(Debug, Clone, Serialize)]
pub struct StoryLineItemView {
    /// Position in the strip; pass this to `open`.
    pub index: usize,
    /// The collection's author.
    pub author: UserId,
    /// Author display name.
    pub username: String,
    /// Author avatar.
    pub avatar_url: String,
    /// Number of posts in the collection.
    pub post_count: usize,
}

/// The avatar strip.
#[derive(Debug, Clone, Serialize)]
pub struct StoryLineView {
    /// The user the strip is rendered for.
    pub focus_user: UserId,
    /// Avatars in strip order.
    pub items: Vec<StoryLineItemView>,
}

/// A post as shown in the collection detail.
#[derive(Debug, Clone, Serialize)]
pub struct StoryPostView {
    /// Playback position within the collection.
    pub position: usize,
    /// Image or video.
    pub media_type: MediaType,
    /// Media URL.
    pub content_url: String,
    /// Publication time.
    pub created_at: DateTime<Utc>,
    /// How many users saw it.
    pub viewer_count: usize,
    /// Reaction tallies, keyed by kind.
    pub reactions: BTreeMap<ReactionKind, usize>,
}

/// One user's collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionView {
    /// Position in the strip.
    pub index: usize,
    /// The collection's author.
    pub author: UserId,
    /// Author display name.
    pub username: String,
    /// Posts in playback order.
    pub posts: Vec<StoryPostView>,
}

/// Builds the avatar strip.
#[must_use]
pub fn story_line_view(catalog: &Catalog) -> StoryLineView {
    let story_line = catalog.story_line();
    let items = story_line
        .collections
        .iter()
        .enumerate()
        .map(|(index, collection)| {
            let username = catalog
                .profile(&collection.author)
                .map(|p| p.username.clone())
                .unwrap_or_default();
            StoryLineItemView {
                index,
                author: collection.author.clone(),
                username,
                avatar_url: catalog
                    .avatar_for(&collection.author)
                    .unwrap_or_default()
                    .to_owned(),
                post_count: collection.len(),
            }
        })
        .collect();

    StoryLineView {
        focus_user: story_line.focus_user.clone(),
        items,
    }
}

/// Builds the detail view of the collection at `index`.
///
/// # Errors
///
/// Returns `DomainError::IndexOutOfRange` if `index` is not a strip position.
pub fn collection_view(catalog: &Catalog, index: usize) -> Result<CollectionView, DomainError> {
    let story_line = catalog.story_line();
    let collection = story_line
        .collection(index)
        .ok_or(DomainError::IndexOutOfRange {
            index,
            len: story_line.len(),
        })?;

    let posts = collection
        .posts
        .iter()
        .enumerate()
        .map(|(position, post)| {
            let mut reactions = BTreeMap::new();
            for reaction in &post.reactions {
                *reactions.entry(reaction.kind).or_insert(0) += 1;
            }
            StoryPostView {
                position,
                media_type: post.media_type,
                content_url: post.content_url.clone(),
                created_at: post.created_at,
                viewer_count: post.viewed_by.len(),
                reactions,
            }
        })
        .collect();

    Ok(CollectionView {
        index,
        author: collection.author.clone(),
        username: catalog
            .profile(&collection.author)
            .map(|p| p.username.clone())
            .unwrap_or_default(),
        posts,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::TimeZone;

    use super::*;
    use crate::domain::profile::Profile;
    use crate::domain::story::{Reaction, StoryLine, StoryPost, UserStoryCollection};

    fn catalog() -> Catalog {
        let profiles = ["alice", "bob", "carol"]
            .iter()
            .map(|id| Profile {
                user_id: UserId::from(*id),
                username: format!("@{id}"),
                avatar_url: format!("https://avatars.example/{id}.png"),
                has_stories: *id != "alice",
            })
            .collect();
        let post = |author: &str, reactions: Vec<(&str, ReactionKind)>| StoryPost {
            author: UserId::from(author),
            media_type: MediaType::Image,
            content_url: "https://picsum.photos/500/700".to_owned(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap(),
            viewed_by: reactions
                .iter()
                .map(|(id, _)| UserId::from(*id))
                .collect::<BTreeSet<_>>(),
            reactions: reactions
                .into_iter()
                .map(|(id, kind)| Reaction {
                    user_id: UserId::from(id),
                    kind,
                })
                .collect(),
        };
        let story_line = StoryLine {
            focus_user: UserId::from("alice"),
            collections: vec![
                UserStoryCollection {
                    author: UserId::from("bob"),
                    posts: vec![
                        post(
                            "bob",
                            vec![("alice", ReactionKind::Love), ("carol", ReactionKind::Love)],
                        ),
                        post("bob", vec![("carol", ReactionKind::Laugh)]),
                    ],
                },
                UserStoryCollection {
                    author: UserId::from("carol"),
                    posts: vec![post("carol", vec![])],
                },
            ],
        };
        Catalog::new(profiles, story_line).unwrap()
    }

    #[test]
    fn test_story_line_view_lists_one_item_per_collection() {
        let view = story_line_view(&catalog());

        assert_eq!(view.focus_user, UserId::from("alice"));
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].username, "@bob");
        assert_eq!(view.items[0].avatar_url, "https://avatars.example/bob.png");
        assert_eq!(view.items[0].post_count, 2);
        assert_eq!(view.items[1].index, 1);
    }

    #[test]
    fn test_collection_view_tallies_reactions() {
        let view = collection_view(&catalog(), 0).unwrap();

        assert_eq!(view.posts.len(), 2);
        assert_eq!(view.posts[0].viewer_count, 2);
        assert_eq!(view.posts[0].reactions.get(&ReactionKind::Love), Some(&2));
        assert_eq!(view.posts[1].reactions.get(&ReactionKind::Laugh), Some(&1));
        assert!(view.posts[1].reactions.get(&ReactionKind::Love).is_none());
    }

    #[test]
    fn test_collection_view_rejects_out_of_range_index() {
        let result = collection_view(&catalog(), 2);

        match result {
            Err(DomainError::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 2);
                assert_eq!(len, 2);
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }
}
