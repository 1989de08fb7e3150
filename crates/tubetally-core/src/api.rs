//! Catalog API seam.
//!
//! [`CatalogApi`] is the boundary between the calculation pipeline and the
//! remote video catalog. The pipeline only ever talks to this trait, so it
//! can be driven by the HTTP client in [`crate::client`] or by a mock in
//! tests.
//!
//! The wire types mirror the subset of the YouTube Data API v3 responses
//! that the pipeline reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reference::PlaylistReference;

/// Maximum number of entries the catalog returns per listing page, and the
/// maximum number of ids accepted by one detail lookup.
pub const PAGE_SIZE: usize = 50;

/// Title and owner of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    /// Playlist title.
    pub title: String,
    /// Name of the channel owning the playlist.
    #[serde(default)]
    pub channel_title: String,
}

/// One page of a playlist listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPage {
    /// Video ids on this page, in server order.
    pub video_ids: Vec<String>,
    /// Continuation token; `None` on the last page.
    pub next_page_token: Option<String>,
}

/// A video resource as returned by a detail lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    /// Video id.
    pub id: String,
    /// Title and thumbnails.
    pub snippet: VideoSnippet,
    /// Duration.
    pub content_details: VideoContentDetails,
}

/// Descriptive part of a [`VideoResource`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VideoSnippet {
    /// Video title.
    #[serde(default)]
    pub title: String,
    /// Available thumbnails keyed by resolution.
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

/// Thumbnail set of a video. Any resolution may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Thumbnails {
    /// 120x90.
    #[serde(default)]
    pub default: Option<Thumbnail>,
    /// 320x180.
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    /// 480x360.
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

/// A single thumbnail image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thumbnail {
    /// Image URL.
    pub url: String,
}

/// Duration part of a [`VideoResource`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VideoContentDetails {
    /// ISO-8601 style duration such as `PT4M13S`.
    #[serde(default)]
    pub duration: String,
}

/// Read operations the pipeline needs from the video catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Look up a playlist's title and channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] when the playlist does not exist or
    /// is private, and a transport error when the request fails.
    async fn playlist_snippet(&self, playlist: &PlaylistReference) -> Result<PlaylistSnippet>;

    /// Fetch one page of up to [`PAGE_SIZE`] video ids.
    ///
    /// `page_token` is `None` for the first page.
    async fn playlist_items_page(
        &self,
        playlist: &PlaylistReference,
        page_token: Option<String>,
    ) -> Result<ItemPage>;

    /// Fetch details for up to [`PAGE_SIZE`] videos in one request.
    ///
    /// Ids the catalog does not know are absent from the response.
    async fn video_batch(&self, ids: &[String]) -> Result<Vec<VideoResource>>;
}
