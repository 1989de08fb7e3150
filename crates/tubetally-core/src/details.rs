//! Batched metadata retrieval.
//!
//! Fetches title, duration and thumbnail for a sequence of playlist entries,
//! at most [`MAX_BATCH_SIZE`] ids per request. Output order always follows
//! input order, whatever order the requests complete or the server lists
//! the videos in.

use std::collections::HashMap;

use futures::{StreamExt, TryStreamExt, stream};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::api::{CatalogApi, PAGE_SIZE, Thumbnails, VideoResource};
use crate::duration::PlaybackDuration;
use crate::enumerate::PlaylistEntry;
use crate::error::Result;

/// Maximum number of ids sent in one detail request.
pub const MAX_BATCH_SIZE: usize = PAGE_SIZE;

/// Details of one playlist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    /// Video id.
    pub id: String,
    /// Video title.
    pub title: String,
    /// Duration in whole seconds (0 when the catalog's value is unparseable).
    pub duration_seconds: u64,
    /// Thumbnail image URL.
    pub thumbnail_url: String,
    /// 1-based position within the playlist.
    pub position: u32,
}

impl ItemDetail {
    /// Build an item from a catalog resource and its playlist entry.
    #[must_use]
    pub fn from_resource(resource: &VideoResource, position: u32) -> Self {
        Self {
            id: resource.id.clone(),
            title: resource.snippet.title.clone(),
            duration_seconds: PlaybackDuration::decode(&resource.content_details.duration)
                .as_secs(),
            thumbnail_url: select_thumbnail(&resource.id, &resource.snippet.thumbnails),
            position,
        }
    }

    /// Duration as a [`PlaybackDuration`].
    #[must_use]
    pub const fn duration(&self) -> PlaybackDuration {
        PlaybackDuration::from_secs(self.duration_seconds)
    }

    /// Watch page URL for this video.
    #[must_use]
    pub fn watch_url(&self) -> String {
        watch_url(&self.id)
    }
}

/// Watch page URL for a video id.
#[must_use]
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Static thumbnail URL for a video id, used when the catalog lists none.
#[must_use]
pub fn fallback_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/mqdefault.jpg")
}

/// Pick the medium thumbnail, falling back to the default one.
#[must_use]
pub fn select_thumbnail(video_id: &str, thumbnails: &Thumbnails) -> String {
    thumbnails
        .medium
        .as_ref()
        .or(thumbnails.default.as_ref())
        .map_or_else(|| fallback_thumbnail_url(video_id), |t| t.url.clone())
}

/// Fetch details for `entries`, preserving their order.
///
/// Entries are split into consecutive batches of at most
/// [`MAX_BATCH_SIZE`]. Up to `max_concurrent_batches` requests are in flight
/// at once (values below one are treated as one); results are reassembled
/// in submission order. Any failed batch aborts the whole fetch.
///
/// Videos the catalog does not return (deleted or private) are skipped.
#[instrument(skip(api, entries), fields(entries = entries.len()))]
pub async fn fetch_details<A: CatalogApi + ?Sized>(
    api: &A,
    entries: &[PlaylistEntry],
    max_concurrent_batches: usize,
) -> Result<Vec<ItemDetail>> {
    let concurrency = max_concurrent_batches.max(1);

    let batches: Vec<Vec<ItemDetail>> = stream::iter(entries.chunks(MAX_BATCH_SIZE).enumerate())
        .map(|(index, batch)| fetch_batch(api, index, batch))
        .buffered(concurrency)
        .try_collect()
        .await?;

    let details: Vec<ItemDetail> = batches.into_iter().flatten().collect();

    info!(
        requested = entries.len(),
        fetched = details.len(),
        "Fetched item details"
    );
    Ok(details)
}

async fn fetch_batch<A: CatalogApi + ?Sized>(
    api: &A,
    index: usize,
    batch: &[PlaylistEntry],
) -> Result<Vec<ItemDetail>> {
    let ids: Vec<String> = batch.iter().map(|e| e.video_id.clone()).collect();
    debug!(batch = index, size = ids.len(), "Requesting item details");

    let resources = api.video_batch(&ids).await?;
    let by_id: HashMap<&str, &VideoResource> =
        resources.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut details = Vec::with_capacity(batch.len());
    for entry in batch {
        match by_id.get(entry.video_id.as_str()) {
            Some(resource) => details.push(ItemDetail::from_resource(resource, entry.position)),
            None => warn!(
                video_id = %entry.video_id,
                position = entry.position,
                "Video missing from catalog response, skipping"
            ),
        }
    }

    Ok(details)
}
