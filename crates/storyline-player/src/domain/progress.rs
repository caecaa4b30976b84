//! Progress bar display rule.
//!
//! The bar is split into one equal segment per post. Only the current post's
//! segment is live; earlier ones show full and later ones empty. This is
//! derived from the player state, never stored.

use serde::Serialize;

/// One post's slice of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSegment {
    /// Post index.
    pub index: usize,
    /// Share of the bar, `100 / post_count`.
    pub width_percent: f64,
    /// How full the segment is, `0..=100`.
    pub fill_percent: f64,
}

/// Builds the segments for `post_count` posts with `current` live at
/// `elapsed_percent`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn segments(post_count: usize, current: usize, elapsed_percent: f64) -> Vec<ProgressSegment> {
    if post_count == 0 {
        return Vec::new();
    }
    let width_percent = 100.0 / post_count as f64;
    (0..post_count)
        .map(|index| ProgressSegment {
            index,
            width_percent,
            fill_percent: match index.cmp(&current) {
                std::cmp::Ordering::Less => 100.0,
                std::cmp::Ordering::Equal => elapsed_percent.clamp(0.0, 100.0),
                std::cmp::Ordering::Greater => 0.0,
            },
        })
        .collect()
}
