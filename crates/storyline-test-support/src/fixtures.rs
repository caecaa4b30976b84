//! Catalog fixtures.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use storyline_catalog::domain::catalog::Catalog;
use storyline_catalog::domain::profile::{Profile, UserId};
use storyline_catalog::domain::story::{MediaType, StoryLine, StoryPost, UserStoryCollection};

/// Fixed timestamp shared by fixtures and test clocks.
#[must_use]
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// Builds a catalog whose story line has one collection per entry of
/// `post_counts`, authored by `user-0`, `user-1`, ... The focus user is
/// `viewer`, who has no stories.
///
/// # Panics
///
/// Panics if any entry of `post_counts` is zero.
#[must_use]
pub fn fixture_catalog(post_counts: &[usize]) -> Catalog {
    let mut profiles = vec![Profile {
        user_id: UserId::from("viewer"),
        username: "viewer".to_owned(),
        avatar_url: "https://avatars.example/viewer.png".to_owned(),
        has_stories: false,
    }];

    let mut collections = Vec::new();
    for (index, &count) in post_counts.iter().enumerate() {
        let author = UserId::new(format!("user-{index}"));
        profiles.push(Profile {
            user_id: author.clone(),
            username: format!("user_{index}"),
            avatar_url: format!("https://avatars.example/user-{index}.png"),
            has_stories: true,
        });
        let posts = (0..count)
            .map(|position| StoryPost {
                author: author.clone(),
                media_type: MediaType::Image,
                content_url: format!("https://picsum.photos/seed/{index}-{position}/400/700"),
                created_at: fixture_time()
                    + TimeDelta::minutes(i64::try_from(position).unwrap()),
                viewed_by: BTreeSet::from([UserId::from("viewer")]),
                reactions: Vec::new(),
            })
            .collect();
        collections.push(UserStoryCollection { author, posts });
    }

    Catalog::new(
        profiles,
        StoryLine {
            focus_user: UserId::from("viewer"),
            collections,
        },
    )
    .expect("fixture catalog must satisfy catalog invariants")
}
