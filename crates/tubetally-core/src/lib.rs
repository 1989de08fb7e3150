//! `Tubetally` Core Library
//!
//! This crate provides the core functionality for the `Tubetally` tool:
//! - Resolving playlist URLs and identifiers
//! - Enumerating playlist items through the catalog's paged listing
//! - Batched retrieval of video titles, durations and thumbnails
//! - Duration decoding, formatting and aggregation
//! - Catalog access configuration
//!
//! # Error Handling
//!
//! Every fallible operation returns [`Result`]. Errors are classified by
//! [`ErrorKind`] so presentation layers can map them to messages.
//!
//! ```rust,ignore
//! use tubetally_core::{CatalogConfig, Result, fetch_playlist_data};
//!
//! async fn total(input: &str) -> Result<u64> {
//!     let config = CatalogConfig::load()?;
//!     let result = fetch_playlist_data(&config, input, None, None).await?;
//!     Ok(result.total_duration_seconds)
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod calculator;
pub mod client;
pub mod config;
pub mod details;
pub mod duration;
pub mod enumerate;
pub mod error;
pub mod range;
pub mod reference;

pub use aggregate::{
    PlaylistSummary, STANDARD_SPEEDS, SpeedProjection, aggregate, speed_projections,
};
pub use api::{
    CatalogApi, ItemPage, PAGE_SIZE, PlaylistSnippet, Thumbnail, Thumbnails, VideoContentDetails,
    VideoResource, VideoSnippet,
};
pub use calculator::{PlaylistCalculator, PlaylistResult, fetch_playlist_data};
pub use client::YouTubeDataClient;
pub use config::{
    API_KEY_ENV, BASE_URL_ENV, CatalogConfig, DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENT_BATCHES,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use details::{
    ItemDetail, MAX_BATCH_SIZE, fallback_thumbnail_url, fetch_details, select_thumbnail,
    watch_url,
};
pub use duration::{DurationStyle, PlaybackDuration};
pub use enumerate::{ItemPager, PlaylistEntry, enumerate_items};
pub use error::{Error, ErrorKind, Result};
pub use range::{RangeError, RangeSelection, parse_position, select_range};
pub use reference::{PlaylistReference, RAW_ID_LENGTH, playlist_url, resolve_reference};
