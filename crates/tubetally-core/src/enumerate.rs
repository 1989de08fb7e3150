//! Playlist item enumeration.
//!
//! Lists every video id of a playlist by following the catalog's
//! continuation tokens until a page arrives without one.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::api::CatalogApi;
use crate::error::Result;
use crate::reference::PlaylistReference;

/// One enumerated playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Id of the video at this position.
    pub video_id: String,
    /// 1-based position within the whole playlist.
    pub position: u32,
}

/// Pull-based pager over a playlist listing.
///
/// Each call to [`ItemPager::next_page`] issues one request. The pager is
/// finite and cannot be restarted: once the catalog omits a continuation
/// token, every further call returns `Ok(None)`.
pub struct ItemPager<'a, A: CatalogApi + ?Sized> {
    api: &'a A,
    playlist: &'a PlaylistReference,
    next_token: Option<String>,
    next_position: u32,
    pages_fetched: usize,
    finished: bool,
}

impl<'a, A: CatalogApi + ?Sized> ItemPager<'a, A> {
    /// Create a pager positioned before the first page.
    pub const fn new(api: &'a A, playlist: &'a PlaylistReference) -> Self {
        Self {
            api,
            playlist,
            next_token: None,
            next_position: 1,
            pages_fetched: 0,
            finished: false,
        }
    }

    /// Number of pages fetched so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Whether the last page has been seen.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fetch the next page, numbering its entries after the previous ones.
    ///
    /// Returns `Ok(None)` once the listing is exhausted. A failed request
    /// leaves the pager unchanged and the error is returned as-is.
    pub async fn next_page(&mut self) -> Result<Option<Vec<PlaylistEntry>>> {
        if self.finished {
            return Ok(None);
        }

        let page = self
            .api
            .playlist_items_page(self.playlist, self.next_token.clone())
            .await?;
        self.pages_fetched += 1;

        let entries: Vec<PlaylistEntry> = page
            .video_ids
            .into_iter()
            .map(|video_id| {
                let entry = PlaylistEntry {
                    video_id,
                    position: self.next_position,
                };
                self.next_position += 1;
                entry
            })
            .collect();

        // An empty token ends the listing just like a missing one.
        self.next_token = page.next_page_token.filter(|token| !token.is_empty());
        self.finished = self.next_token.is_none();

        debug!(
            playlist_id = %self.playlist,
            page = self.pages_fetched,
            entries = entries.len(),
            has_more = !self.finished,
            "Fetched playlist page"
        );

        Ok(Some(entries))
    }
}

/// Enumerate every entry of a playlist in server order.
///
/// Fails fast on the first page error; no partial listing is returned.
#[instrument(skip(api, playlist), fields(playlist_id = %playlist))]
pub async fn enumerate_items<A: CatalogApi + ?Sized>(
    api: &A,
    playlist: &PlaylistReference,
) -> Result<Vec<PlaylistEntry>> {
    let mut pager = ItemPager::new(api, playlist);
    let mut entries = Vec::new();

    while let Some(page) = pager.next_page().await? {
        entries.extend(page);
    }

    info!(
        entries = entries.len(),
        pages = pager.pages_fetched(),
        "Enumerated playlist"
    );
    Ok(entries)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::{ItemPage, MockCatalogApi};
    use crate::error::Error;
    use crate::reference::resolve_reference;

    fn playlist() -> PlaylistReference {
        resolve_reference("https://www.youtube.com/playlist?list=PLtest").unwrap()
    }

    fn page(start: usize, count: usize, token: Option<&str>) -> ItemPage {
        ItemPage {
            video_ids: (start..start + count).map(|i| format!("v{i}")).collect(),
            next_page_token: token.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_follows_continuation_tokens() {
        let mut api = MockCatalogApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_playlist_items_page()
            .withf(|_, token| token.is_none())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(page(0, 50, Some("t1"))));
        api.expect_playlist_items_page()
            .withf(|_, token| token.as_deref() == Some("t1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(page(50, 50, Some("t2"))));
        api.expect_playlist_items_page()
            .withf(|_, token| token.as_deref() == Some("t2"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(page(100, 7, None)));

        let entries = enumerate_items(&api, &playlist()).await.unwrap();

        assert_eq!(entries.len(), 107);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.video_id, format!("v{i}"));
            assert_eq!(entry.position as usize, i + 1);
        }
    }

    #[tokio::test]
    async fn test_single_page() {
        let mut api = MockCatalogApi::new();
        api.expect_playlist_items_page()
            .times(1)
            .returning(|_, _| Ok(page(0, 3, None)));

        let entries = enumerate_items(&api, &playlist()).await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].position, 3);
    }

    #[tokio::test]
    async fn test_empty_token_ends_listing() {
        let mut api = MockCatalogApi::new();
        api.expect_playlist_items_page()
            .times(1)
            .returning(|_, _| Ok(page(0, 2, Some(""))));

        let entries = enumerate_items(&api, &playlist()).await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_playlist() {
        let mut api = MockCatalogApi::new();
        api.expect_playlist_items_page()
            .times(1)
            .returning(|_, _| Ok(ItemPage::default()));

        let entries = enumerate_items(&api, &playlist()).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_page_error_aborts() {
        let mut api = MockCatalogApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_playlist_items_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(page(0, 50, Some("t1"))));
        api.expect_playlist_items_page()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Err(Error::Transport {
                    status: 500,
                    message: "backend error".to_string(),
                })
            });

        let err = enumerate_items(&api, &playlist()).await.unwrap_err();
        assert!(matches!(err, Error::Transport { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_pager_is_not_restartable() {
        let mut api = MockCatalogApi::new();
        api.expect_playlist_items_page()
            .times(1)
            .returning(|_, _| Ok(page(0, 1, None)));

        let playlist = playlist();
        let mut pager = ItemPager::new(&api, &playlist);
        assert!(!pager.is_finished());
        assert_eq!(pager.next_page().await.unwrap().map(|p| p.len()), Some(1));
        assert!(pager.is_finished());
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(pager.pages_fetched(), 1);
    }
}
