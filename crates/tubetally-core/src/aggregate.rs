//! Duration aggregation over fetched items.

use serde::{Deserialize, Serialize};

use crate::details::ItemDetail;
use crate::duration::PlaybackDuration;

/// Playback speeds shown alongside the 1x total.
pub const STANDARD_SPEEDS: [f64; 4] = [0.75, 1.25, 1.5, 2.0];

/// Aggregate statistics over a sequence of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    /// Number of items aggregated.
    pub item_count: usize,
    /// Exact sum of all item durations.
    pub total: PlaybackDuration,
    /// Mean item duration, rounded to the nearest second.
    pub average: PlaybackDuration,
    /// First item, if any.
    pub first: Option<ItemDetail>,
    /// Last item, if any.
    pub last: Option<ItemDetail>,
}

impl PlaylistSummary {
    /// Whether there was nothing to aggregate.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Total duration projected onto [`STANDARD_SPEEDS`].
    #[must_use]
    pub fn speed_projections(&self) -> Vec<SpeedProjection> {
        speed_projections(self.total)
    }
}

/// Total duration at a given playback speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedProjection {
    /// Speed factor (2.0 = twice as fast).
    pub speed: f64,
    /// Rounded playback time at that speed.
    pub duration: PlaybackDuration,
}

/// Aggregate `details` into a [`PlaylistSummary`].
///
/// Pure: the same input always yields the same summary. An empty input
/// yields zero durations and no first/last item.
#[must_use]
pub fn aggregate(details: &[ItemDetail]) -> PlaylistSummary {
    let total: PlaybackDuration = details.iter().map(ItemDetail::duration).sum();

    PlaylistSummary {
        item_count: details.len(),
        total,
        average: average(total, details.len()),
        first: details.first().cloned(),
        last: details.last().cloned(),
    }
}

/// Project `total` onto each of [`STANDARD_SPEEDS`], rounding each
/// independently. The projections are not adjusted to be consistent with
/// each other.
#[must_use]
pub fn speed_projections(total: PlaybackDuration) -> Vec<SpeedProjection> {
    STANDARD_SPEEDS
        .iter()
        .map(|&speed| SpeedProjection {
            speed,
            duration: total.at_speed(speed),
        })
        .collect()
}

fn average(total: PlaybackDuration, count: usize) -> PlaybackDuration {
    if count == 0 {
        return PlaybackDuration::ZERO;
    }
    let count = count as u64;
    // Integer round-half-up of total / count.
    PlaybackDuration::from_secs(total.as_secs().saturating_add(count / 2) / count)
}
