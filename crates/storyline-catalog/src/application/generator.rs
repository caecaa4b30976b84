//! Synthetic catalog generator.
//!
//! Produces a believable set of profiles and stories for demos. All
//! randomness goes through [`DeterministicRng`] and all timestamps through
//! [`Clock`], so a fixed seed and clock reproduce the same catalog.

use std::collections::BTreeSet;

use chrono::TimeDelta;
use storyline_core::clock::Clock;
use storyline_core::error::DomainError;
use storyline_core::rng::{DeterministicRng, pick_index, shuffle};
use tracing::debug;

use crate::domain::catalog::Catalog;
use crate::domain::profile::{Profile, UserId};
use crate::domain::story::{
    MediaType, Reaction, ReactionKind, StoryLine, StoryPost, UserStoryCollection,
};

const FIRST_NAMES: [&str; 16] = [
    "Ada", "Bruno", "Celia", "Dmitri", "Elif", "Farah", "Goran", "Hana", "Ivo", "Jun", "Kemal",
    "Lena", "Milo", "Nadia", "Oskar", "Priya",
];

const LAST_NAMES: [&str; 16] = [
    "Anders", "Basso", "Costa", "Dahl", "Eze", "Fischer", "Gray", "Holm", "Ito", "Jensen",
    "Kovac", "Lind", "Moreau", "Novak", "Okafor", "Park",
];

/// Knobs for the synthetic catalog.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Number of profiles to create.
    pub profile_count: usize,
    /// Exclusive upper bound on posts per user (a user gets `0..max`).
    pub max_posts_per_user: u32,
    /// Exclusive upper bound on viewers per post.
    pub max_viewers_per_post: u32,
    /// Candidate image widths and heights, in pixels.
    pub image_dimensions: Vec<u32>,
    /// How far back post timestamps may reach.
    pub created_within: TimeDelta,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            profile_count: 10,
            max_posts_per_user: 5,
            max_viewers_per_post: 10,
            image_dimensions: vec![300, 400, 500, 600, 700, 800, 900],
            created_within: TimeDelta::hours(24),
        }
    }
}

/// Generates a validated synthetic catalog.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `profile_count` is zero or no image
/// dimensions are configured, and `DomainError::InvariantViolation` if the
/// generated data fails catalog validation.
pub fn generate_catalog(
    settings: &GeneratorSettings,
    rng: &mut dyn DeterministicRng,
    clock: &dyn Clock,
) -> Result<Catalog, DomainError> {
    if settings.profile_count == 0 {
        return Err(DomainError::Validation(
            "profile_count must be at least 1".to_owned(),
        ));
    }
    if settings.image_dimensions.is_empty() {
        return Err(DomainError::Validation(
            "image_dimensions must not be empty".to_owned(),
        ));
    }

    let mut profiles: Vec<Profile> = (0..settings.profile_count)
        .map(|_| random_profile(rng))
        .collect();
    let all_ids: Vec<UserId> = profiles.iter().map(|p| p.user_id.clone()).collect();

    let mut collections = Vec::new();
    for profile in &mut profiles {
        if !profile.has_stories {
            continue;
        }
        let post_count = rng.next_u32_range(0, settings.max_posts_per_user.saturating_sub(1));
        let mut posts: Vec<StoryPost> = (0..post_count)
            .map(|_| random_post(&profile.user_id, &all_ids, settings, rng, clock))
            .collect();
        if posts.is_empty() {
            profile.has_stories = false;
            continue;
        }
        posts.sort_by_key(|post| post.created_at);
        collections.push(UserStoryCollection {
            author: profile.user_id.clone(),
            posts,
        });
    }

    let focus_index = pick_index(rng, all_ids.len()).unwrap_or(0);
    let story_line = StoryLine {
        focus_user: all_ids[focus_index].clone(),
        collections,
    };

    debug!(
        profiles = profiles.len(),
        collections = story_line.len(),
        "generated synthetic catalog"
    );

    Catalog::new(profiles, story_line)
}

fn random_profile(rng: &mut dyn DeterministicRng) -> Profile {
    let user_id = UserId::new(rng.next_uuid().to_string());
    let avatar_id = rng.next_u32_range(1, 99_999_999);
    Profile {
        user_id,
        username: random_username(rng),
        avatar_url: format!("https://avatars.githubusercontent.com/u/{avatar_id}"),
        has_stories: rng.next_bool(),
    }
}

fn random_username(rng: &mut dyn DeterministicRng) -> String {
    let first = FIRST_NAMES[pick_index(rng, FIRST_NAMES.len()).unwrap_or(0)];
    let last = LAST_NAMES[pick_index(rng, LAST_NAMES.len()).unwrap_or(0)];
    match rng.next_u32_range(0, 2) {
        0 => format!("{first}.{last}"),
        1 => format!("{first}_{last}"),
        _ => format!("{first}{}", rng.next_u32_range(1, 99)),
    }
}

fn random_post(
    author: &UserId,
    all_ids: &[UserId],
    settings: &GeneratorSettings,
    rng: &mut dyn DeterministicRng,
    clock: &dyn Clock,
) -> StoryPost {
    let viewer_bound = settings.max_viewers_per_post.saturating_sub(1);
    let viewer_count = rng.next_u32_range(0, viewer_bound) as usize;
    let mut viewers = all_ids.to_vec();
    shuffle(rng, &mut viewers);
    viewers.truncate(viewer_count);

    let reactions = viewers
        .iter()
        .map(|viewer| Reaction {
            user_id: viewer.clone(),
            kind: ReactionKind::ALL[pick_index(rng, ReactionKind::ALL.len()).unwrap_or(0)],
        })
        .collect();

    StoryPost {
        author: author.clone(),
        media_type: MediaType::Image,
        content_url: random_image_url(&settings.image_dimensions, rng),
        created_at: random_timestamp(settings.created_within, rng, clock),
        viewed_by: viewers.into_iter().collect::<BTreeSet<_>>(),
        reactions,
    }
}

fn random_image_url(dimensions: &[u32], rng: &mut dyn DeterministicRng) -> String {
    let width = dimensions[pick_index(rng, dimensions.len()).unwrap_or(0)];
    let height = dimensions[pick_index(rng, dimensions.len()).unwrap_or(0)];
    format!("https://picsum.photos/{width}/{height}")
}

/// Uniform instant in `[now - window, now]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn random_timestamp(
    window: TimeDelta,
    rng: &mut dyn DeterministicRng,
    clock: &dyn Clock,
) -> chrono::DateTime<chrono::Utc> {
    let span_ms = window.num_milliseconds().max(0);
    let offset_ms = (rng.next_f64() * span_ms as f64) as i64;
    clock.window_start(window) + TimeDelta::milliseconds(offset_ms)
}
