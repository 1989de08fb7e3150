//! Position range selection.
//!
//! A range is a 1-based inclusive `[from, to]` pair restricting the
//! calculation to a contiguous part of the playlist. Either bound may be
//! omitted: `from` defaults to the first item, `to` to the last.

use serde::Serialize;
use thiserror::Error;

use crate::enumerate::PlaylistEntry;
use crate::error::Result;

/// Reasons a range is rejected. Each carries its own user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// A bound was not a number.
    #[error("Please enter valid numbers for video range")]
    NotANumber,

    /// A bound was zero.
    #[error("Video numbers must be greater than 0")]
    BelowOne,

    /// A bound was past the end of the playlist.
    #[error("Video numbers cannot exceed {count}")]
    ExceedsCount {
        /// Number of items in the playlist.
        count: usize,
    },

    /// `from` was greater than `to`.
    #[error("From video number must be less than or equal to To video number")]
    Reversed,

    /// There is nothing to select from.
    #[error("The playlist has no videos to select from")]
    Empty,
}

/// A validated 1-based inclusive range of playlist positions.
///
/// Only built by [`RangeSelection::validate`], so `1 <= from <= to` always
/// holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeSelection {
    from: u32,
    to: u32,
}

impl RangeSelection {
    /// Validate optional bounds against a playlist of `total` items.
    ///
    /// Missing bounds default to the full playlist. Checks run in a fixed
    /// order so the first failing rule decides the message.
    pub fn validate(
        from: Option<u32>,
        to: Option<u32>,
        total: usize,
    ) -> std::result::Result<Self, RangeError> {
        if total == 0 {
            return Err(RangeError::Empty);
        }

        let last = u32::try_from(total).unwrap_or(u32::MAX);
        let from = from.unwrap_or(1);
        let to = to.unwrap_or(last);

        if from < 1 || to < 1 {
            return Err(RangeError::BelowOne);
        }
        if from > last || to > last {
            return Err(RangeError::ExceedsCount { count: total });
        }
        if from > to {
            return Err(RangeError::Reversed);
        }

        Ok(Self { from, to })
    }

    /// First position (1-based, inclusive).
    #[must_use]
    pub const fn from(&self) -> u32 {
        self.from
    }

    /// Last position (1-based, inclusive).
    #[must_use]
    pub const fn to(&self) -> u32 {
        self.to
    }

    /// Number of positions covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.to - self.from) as usize + 1
    }

    /// Always `false`: a validated range covers at least one position.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether the range covers every position of a playlist of `total` items.
    #[must_use]
    pub fn is_full(&self, total: usize) -> bool {
        self.from == 1 && self.to as usize == total
    }

    /// Zero-based half-open slice bounds.
    #[must_use]
    pub const fn as_slice_bounds(&self) -> std::ops::Range<usize> {
        (self.from as usize - 1)..self.to as usize
    }

    /// The covered part of `items`, which must be the list the range was
    /// validated against.
    #[must_use]
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.as_slice_bounds()]
    }
}

/// Parse one raw range bound as typed by a user.
///
/// Blank input means "not given". Any integer parses; zero and negative
/// values are rejected as [`RangeError::BelowOne`]. Integers too large to
/// be a position are [`RangeError::NotANumber`].
pub fn parse_position(raw: &str) -> std::result::Result<Option<u32>, RangeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = trimmed
        .parse::<i64>()
        .map_err(|_| RangeError::NotANumber)?;
    if value < 1 {
        return Err(RangeError::BelowOne);
    }
    u32::try_from(value)
        .map(Some)
        .map_err(|_| RangeError::NotANumber)
}

/// Validate `[from, to]` against `entries` and return the range with the
/// entries it covers. Order and original positions are preserved.
pub fn select_range(
    entries: &[PlaylistEntry],
    from: Option<u32>,
    to: Option<u32>,
) -> Result<(RangeSelection, &[PlaylistEntry])> {
    let range = RangeSelection::validate(from, to, entries.len())?;
    Ok((range, range.apply(entries)))
}
