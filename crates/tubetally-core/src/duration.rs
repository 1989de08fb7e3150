//! Playback duration value type.
//!
//! The catalog API encodes durations as ISO-8601 style strings
//! (`PT1H2M3S`). [`PlaybackDuration`] decodes those into whole seconds and
//! formats them back into human-readable units for display.

use std::fmt;
use std::ops::Add;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_DAY: u64 = 86_400;

#[allow(clippy::expect_used)]
static ENCODED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").expect("literal pattern")
});

/// How [`PlaybackDuration::format`] lays out its units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// Hours are the largest unit: `"25h 1m 1s"`.
    #[default]
    Hours,
    /// Days are split out once the duration reaches a full day: `"1d 1h 1m 1s"`.
    Days,
}

/// A whole number of seconds of playback.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlaybackDuration(u64);

impl PlaybackDuration {
    /// Zero seconds.
    pub const ZERO: Self = Self(0);

    /// Create a duration from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Total number of seconds.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Decode an ISO-8601 style duration (`PT1H2M3S`, `P1DT2H`, `PT45S`).
    ///
    /// Never fails: anything that does not parse decodes to zero, which
    /// callers treat as a legitimate zero-length item (live placeholders,
    /// premieres) rather than an error.
    #[must_use]
    pub fn decode(encoded: &str) -> Self {
        let Some(caps) = ENCODED_PATTERN.captures(encoded.trim()) else {
            return Self::ZERO;
        };

        let total = sum_components(&caps);

        total.map_or(Self::ZERO, Self)
    }

    /// Format as `"Mm Ss"`, `"Hh Mm Ss"` or (with [`DurationStyle::Days`])
    /// `"Dd Hh Mm Ss"`. Minutes and seconds are always shown; leading zero
    /// units are omitted.
    #[must_use]
    pub fn format(self, style: DurationStyle) -> String {
        let total = self.0;
        let seconds = total % SECS_PER_MINUTE;
        let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;

        match style {
            DurationStyle::Days if total >= SECS_PER_DAY => {
                let days = total / SECS_PER_DAY;
                let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
                format!("{days}d {hours}h {minutes}m {seconds}s")
            }
            _ if total >= SECS_PER_HOUR => {
                let hours = total / SECS_PER_HOUR;
                format!("{hours}h {minutes}m {seconds}s")
            }
            _ => format!("{minutes}m {seconds}s"),
        }
    }

    /// Playback time at the given speed factor, rounded to the nearest second.
    ///
    /// Non-positive or non-finite factors yield the unchanged duration.
    #[must_use]
    pub fn at_speed(self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return self;
        }
        Self((self.0 as f64 / factor).round() as u64)
    }
}

fn sum_components(caps: &Captures<'_>) -> Option<u64> {
    let component = |index: usize| -> Option<u64> {
        caps.get(index)
            .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
    };

    let days = component(1)?.checked_mul(SECS_PER_DAY)?;
    let hours = component(2)?.checked_mul(SECS_PER_HOUR)?;
    let minutes = component(3)?.checked_mul(SECS_PER_MINUTE)?;
    let seconds = component(4)?;

    days.checked_add(hours)?
        .checked_add(minutes)?
        .checked_add(seconds)
}

impl fmt::Display for PlaybackDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DurationStyle::Hours))
    }
}

impl From<u64> for PlaybackDuration {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

impl Add for PlaybackDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for PlaybackDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full() {
        assert_eq!(PlaybackDuration::decode("PT1H2M3S").as_secs(), 3723);
    }

    #[test]
    fn test_decode_partial_components() {
        assert_eq!(PlaybackDuration::decode("PT45S").as_secs(), 45);
        assert_eq!(PlaybackDuration::decode("PT10M").as_secs(), 600);
        assert_eq!(PlaybackDuration::decode("PT2H").as_secs(), 7200);
        assert_eq!(PlaybackDuration::decode("PT1H30S").as_secs(), 3630);
    }

    #[test]
    fn test_decode_with_days() {
        assert_eq!(PlaybackDuration::decode("P1DT1H1M1S").as_secs(), 90061);
        assert_eq!(PlaybackDuration::decode("P0D").as_secs(), 0);
    }

    #[test]
    fn test_decode_unparseable_is_zero() {
        assert_eq!(PlaybackDuration::decode("garbage").as_secs(), 0);
        assert_eq!(PlaybackDuration::decode("PT").as_secs(), 0);
        assert_eq!(PlaybackDuration::decode("").as_secs(), 0);
        assert_eq!(PlaybackDuration::decode("PT5X").as_secs(), 0);
    }

    #[test]
    fn test_decode_overflow_is_zero() {
        let huge = format!("PT{}H", u64::MAX);
        assert_eq!(PlaybackDuration::decode(&huge).as_secs(), 0);
    }

    #[test]
    fn test_format_hours_style() {
        assert_eq!(PlaybackDuration::from_secs(3723).to_string(), "1h 2m 3s");
        assert_eq!(PlaybackDuration::from_secs(45).to_string(), "0m 45s");
        assert_eq!(PlaybackDuration::from_secs(0).to_string(), "0m 0s");
        assert_eq!(PlaybackDuration::from_secs(3600).to_string(), "1h 0m 0s");
        assert_eq!(PlaybackDuration::from_secs(90061).to_string(), "25h 1m 1s");
    }

    #[test]
    fn test_format_days_style() {
        let d = PlaybackDuration::from_secs(90061);
        assert_eq!(d.format(DurationStyle::Days), "1d 1h 1m 1s");
        assert_eq!(
            PlaybackDuration::from_secs(86_400).format(DurationStyle::Days),
            "1d 0h 0m 0s"
        );
        assert_eq!(
            PlaybackDuration::from_secs(3723).format(DurationStyle::Days),
            "1h 2m 3s"
        );
        assert_eq!(
            PlaybackDuration::from_secs(59).format(DurationStyle::Days),
            "0m 59s"
        );
    }

    #[test]
    fn test_at_speed_rounds_independently() {
        let total = PlaybackDuration::from_secs(210);
        assert_eq!(total.at_speed(0.75).as_secs(), 280);
        assert_eq!(total.at_speed(1.25).as_secs(), 168);
        assert_eq!(total.at_speed(1.5).as_secs(), 140);
        assert_eq!(total.at_speed(2.0).as_secs(), 105);
        assert_eq!(PlaybackDuration::from_secs(101).at_speed(2.0).as_secs(), 51);
    }

    #[test]
    fn test_at_speed_invalid_factor() {
        let total = PlaybackDuration::from_secs(60);
        assert_eq!(total.at_speed(0.0), total);
        assert_eq!(total.at_speed(f64::NAN), total);
    }

    #[test]
    fn test_sum() {
        let total: PlaybackDuration = [60, 120, 30]
            .into_iter()
            .map(PlaybackDuration::from_secs)
            .sum();
        assert_eq!(total.as_secs(), 210);
    }
}
