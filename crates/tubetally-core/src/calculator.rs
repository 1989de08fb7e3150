//! Playlist duration calculation pipeline.
//!
//! Ties the stages together: resolve the reference, look up the playlist,
//! enumerate its items, apply the optional range, fetch item details and
//! aggregate. Each stage fails fast and its error reaches the caller
//! unchanged.
//!
//! ```rust,no_run
//! use tubetally_core::{CatalogConfig, PlaylistCalculator, YouTubeDataClient};
//!
//! # async fn run() -> tubetally_core::Result<()> {
//! let config = CatalogConfig::load()?;
//! let calculator = PlaylistCalculator::new(YouTubeDataClient::new(&config)?);
//! let result = calculator
//!     .fetch_playlist_data("https://www.youtube.com/playlist?list=PLxxxx", Some(3), Some(10))
//!     .await?;
//! println!("{}: {}", result.title, result.total_duration());
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use tracing::{info, instrument};

use crate::aggregate::{PlaylistSummary, SpeedProjection, aggregate, speed_projections};
use crate::api::CatalogApi;
use crate::client::YouTubeDataClient;
use crate::config::{CatalogConfig, DEFAULT_MAX_CONCURRENT_BATCHES};
use crate::details::{ItemDetail, fetch_details};
use crate::duration::PlaybackDuration;
use crate::enumerate::enumerate_items;
use crate::error::{Error, Result};
use crate::range::{RangeSelection, select_range};
use crate::reference::{playlist_url, resolve_reference};

/// Outcome of a successful calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistResult {
    /// Resolved playlist identifier.
    pub reference_id: String,
    /// Playlist title.
    pub title: String,
    /// Channel owning the playlist.
    pub channel_name: String,
    /// Number of entries in the whole playlist, before range selection.
    pub total_item_count: usize,
    /// Range that was applied, if one was requested.
    pub range: Option<RangeSelection>,
    /// Fetched items in playlist order.
    pub items: Vec<ItemDetail>,
    /// Sum of all item durations in seconds.
    pub total_duration_seconds: u64,
}

impl PlaylistResult {
    /// Total duration of the selected items.
    #[must_use]
    pub const fn total_duration(&self) -> PlaybackDuration {
        PlaybackDuration::from_secs(self.total_duration_seconds)
    }

    /// Number of items that contributed to the total.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Aggregate statistics over the selected items.
    #[must_use]
    pub fn summary(&self) -> PlaylistSummary {
        aggregate(&self.items)
    }

    /// Total duration at the standard playback speeds.
    #[must_use]
    pub fn speed_projections(&self) -> Vec<SpeedProjection> {
        speed_projections(self.total_duration())
    }

    /// Canonical URL of the playlist page.
    #[must_use]
    pub fn playlist_url(&self) -> String {
        playlist_url(&self.reference_id)
    }
}

/// Runs calculations against a [`CatalogApi`].
///
/// Holds no per-calculation state, so one calculator can serve several
/// independent calculations at once.
pub struct PlaylistCalculator<A: CatalogApi> {
    api: A,
    max_concurrent_batches: usize,
}

impl<A: CatalogApi> PlaylistCalculator<A> {
    /// Create a calculator fetching one metadata batch at a time.
    pub const fn new(api: A) -> Self {
        Self {
            api,
            max_concurrent_batches: DEFAULT_MAX_CONCURRENT_BATCHES,
        }
    }

    /// Allow up to `batches` metadata requests in flight.
    #[must_use]
    pub const fn with_max_concurrent_batches(mut self, batches: usize) -> Self {
        self.max_concurrent_batches = batches;
        self
    }

    /// The catalog this calculator talks to.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Resolve `raw_input`, fetch the playlist and aggregate its durations.
    ///
    /// When `from` or `to` is given, only that 1-based inclusive range of
    /// positions is fetched and aggregated; the range is validated against
    /// the full playlist length first.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidReference`] if the input cannot be resolved
    /// - [`Error::NotFound`] if the playlist is missing, private or empty
    /// - [`Error::InvalidRange`] if the range fails validation
    /// - [`Error::Transport`] / [`Error::Http`] on any network failure
    #[instrument(skip(self))]
    pub async fn fetch_playlist_data(
        &self,
        raw_input: &str,
        from: Option<u32>,
        to: Option<u32>,
    ) -> Result<PlaylistResult> {
        let reference = resolve_reference(raw_input)?;

        let snippet = self.api.playlist_snippet(&reference).await?;
        let entries = enumerate_items(&self.api, &reference).await?;

        if entries.is_empty() {
            return Err(Error::EmptyPlaylist {
                id: reference.into_inner(),
            });
        }
        let total_item_count = entries.len();

        let (range, selected) = if from.is_some() || to.is_some() {
            let (range, selected) = select_range(&entries, from, to)?;
            (Some(range), selected)
        } else {
            (None, entries.as_slice())
        };

        let items = fetch_details(&self.api, selected, self.max_concurrent_batches).await?;
        let summary = aggregate(&items);

        info!(
            playlist_id = %reference,
            total_items = total_item_count,
            selected = items.len(),
            total_secs = summary.total.as_secs(),
            "Calculated playlist duration"
        );

        Ok(PlaylistResult {
            reference_id: reference.into_inner(),
            title: snippet.title,
            channel_name: snippet.channel_title,
            total_item_count,
            range,
            items,
            total_duration_seconds: summary.total.as_secs(),
        })
    }
}

impl PlaylistCalculator<YouTubeDataClient> {
    /// Build a calculator backed by the HTTP client described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Ok(Self::new(YouTubeDataClient::new(config)?)
            .with_max_concurrent_batches(config.max_concurrent_batches))
    }
}

/// One-shot calculation against the HTTP catalog described by `config`.
///
/// # Errors
///
/// See [`PlaylistCalculator::fetch_playlist_data`]; additionally fails with
/// a configuration error if `config` is invalid.
pub async fn fetch_playlist_data(
    config: &CatalogConfig,
    raw_input: &str,
    from: Option<u32>,
    to: Option<u32>,
) -> Result<PlaylistResult> {
    PlaylistCalculator::from_config(config)?
        .fetch_playlist_data(raw_input, from, to)
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::{
        ItemPage, MockCatalogApi, PlaylistSnippet, Thumbnails, VideoContentDetails,
        VideoResource, VideoSnippet,
    };
    use crate::range::RangeError;

    const PLAYLIST_URL: &str = "https://www.youtube.com/playlist?list=PLcourse";

    fn resource(id: &str, secs: u64) -> VideoResource {
        VideoResource {
            id: id.to_string(),
            snippet: VideoSnippet {
                title: format!("Lesson {id}"),
                thumbnails: Thumbnails::default(),
            },
            content_details: VideoContentDetails {
                duration: format!("PT{secs}S"),
            },
        }
    }

    /// Mock catalog serving a single-page playlist with the given durations.
    fn catalog(durations: &'static [u64]) -> MockCatalogApi {
        let mut api = MockCatalogApi::new();
        api.expect_playlist_snippet().returning(|_| {
            Ok(PlaylistSnippet {
                title: "Course".to_string(),
                channel_title: "Lecture Hall".to_string(),
            })
        });
        api.expect_playlist_items_page().returning(move |_, _| {
            Ok(ItemPage {
                video_ids: (1..=durations.len()).map(|i| format!("v{i}")).collect(),
                next_page_token: None,
            })
        });
        api.expect_video_batch().returning(move |ids| {
            Ok(ids
                .iter()
                .map(|id| {
                    let index: usize = id[1..].parse().unwrap();
                    resource(id, durations[index - 1])
                })
                .collect())
        });
        api
    }

    #[tokio::test]
    async fn test_whole_playlist() {
        let calculator = PlaylistCalculator::new(catalog(&[60, 120, 30]));

        let result = calculator
            .fetch_playlist_data(PLAYLIST_URL, None, None)
            .await
            .unwrap();

        assert_eq!(result.reference_id, "PLcourse");
        assert_eq!(result.title, "Course");
        assert_eq!(result.channel_name, "Lecture Hall");
        assert_eq!(result.total_duration_seconds, 210);
        assert_eq!(result.total_item_count, 3);
        assert!(result.range.is_none());
        assert_eq!(result.playlist_url(), PLAYLIST_URL);
        assert_eq!(
            result.playlist_url(),
            resolve_reference(PLAYLIST_URL).unwrap().playlist_url()
        );

        let summary = result.summary();
        assert_eq!(summary.first.unwrap().position, 1);
        assert_eq!(summary.last.unwrap().position, 3);
    }

    #[tokio::test]
    async fn test_with_range() {
        let calculator = PlaylistCalculator::new(catalog(&[60, 120, 30]));

        let result = calculator
            .fetch_playlist_data(PLAYLIST_URL, Some(2), Some(3))
            .await
            .unwrap();

        assert_eq!(result.total_duration_seconds, 150);
        assert_eq!(result.item_count(), 2);
        assert_eq!(result.total_item_count, 3);
        let range = result.range.unwrap();
        assert_eq!((range.from(), range.to()), (2, 3));

        let summary = result.summary();
        assert_eq!(summary.first.unwrap().id, "v2");
        assert_eq!(summary.last.unwrap().id, "v3");
    }

    #[tokio::test]
    async fn test_open_ended_range() {
        let calculator = PlaylistCalculator::new(catalog(&[60, 120, 30]));

        let result = calculator
            .fetch_playlist_data(PLAYLIST_URL, Some(2), None)
            .await
            .unwrap();
        let range = result.range.unwrap();
        assert_eq!((range.from(), range.to()), (2, 3));
        assert_eq!(result.total_duration_seconds, 150);
    }

    #[tokio::test]
    async fn test_invalid_range() {
        let calculator = PlaylistCalculator::new(catalog(&[60, 120, 30]));

        let err = calculator
            .fetch_playlist_data(PLAYLIST_URL, Some(3), Some(2))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRange(RangeError::Reversed)));

        let err = calculator
            .fetch_playlist_data(PLAYLIST_URL, Some(1), Some(4))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRange(RangeError::ExceedsCount { count: 3 })
        ));
    }

    #[tokio::test]
    async fn test_invalid_reference_makes_no_requests() {
        let mut api = MockCatalogApi::new();
        api.expect_playlist_snippet().never();
        api.expect_playlist_items_page().never();
        api.expect_video_batch().never();

        let err = PlaylistCalculator::new(api)
            .fetch_playlist_data("https://example.com/nothing", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidReference { .. }));
    }

    #[tokio::test]
    async fn test_missing_playlist() {
        let mut api = MockCatalogApi::new();
        api.expect_playlist_snippet()
            .returning(|p| Err(Error::not_found("Playlist", p.as_str())));
        api.expect_playlist_items_page().never();

        let err = PlaylistCalculator::new(api)
            .fetch_playlist_data(PLAYLIST_URL, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_playlist_is_not_found() {
        let mut api = MockCatalogApi::new();
        api.expect_playlist_snippet().returning(|_| {
            Ok(PlaylistSnippet {
                title: "Empty".to_string(),
                channel_title: String::new(),
            })
        });
        api.expect_playlist_items_page()
            .returning(|_, _| Ok(ItemPage::default()));
        api.expect_video_batch().never();

        let err = PlaylistCalculator::new(api)
            .fetch_playlist_data(PLAYLIST_URL, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyPlaylist { .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_zero_duration_items_are_kept() {
        let calculator = PlaylistCalculator::new(catalog(&[0, 45, 0]));

        let result = calculator
            .fetch_playlist_data(PLAYLIST_URL, None, None)
            .await
            .unwrap();
        assert_eq!(result.item_count(), 3);
        assert_eq!(result.total_duration_seconds, 45);
    }

    #[tokio::test]
    async fn test_speed_projections() {
        let calculator = PlaylistCalculator::new(catalog(&[60, 120, 30]));
        let result = calculator
            .fetch_playlist_data(PLAYLIST_URL, None, None)
            .await
            .unwrap();

        let secs: Vec<u64> = result
            .speed_projections()
            .iter()
            .map(|p| p.duration.as_secs())
            .collect();
        assert_eq!(secs, vec![280, 168, 140, 105]);
    }

    #[test]
    fn test_from_config_requires_key() {
        assert!(PlaylistCalculator::from_config(&CatalogConfig::default()).is_err());
    }
}
