//! HTTP client for the YouTube Data API v3.
//!
//! Implements [`CatalogApi`] on top of `reqwest`. Every request carries the
//! configured API key as the `key` query parameter. Requests are issued one
//! at a time by the pipeline; the client itself keeps no state between
//! calls besides the connection pool.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{CatalogApi, ItemPage, PAGE_SIZE, PlaylistSnippet, VideoResource};
use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::reference::PlaylistReference;

/// `reqwest`-backed catalog client.
#[derive(Debug, Clone)]
pub struct YouTubeDataClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default, rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistResource {
    snippet: PlaylistSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemResource {
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: String,
}

impl YouTubeDataClient {
    /// Create a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` is invalid, or an HTTP error
    /// if the underlying client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(format!("tubetally/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        resource: &str,
        subject: &str,
        query: &[(&str, &str)],
    ) -> Result<ListResponse<T>> {
        let url = format!("{}/{resource}", self.base_url);
        debug!(url = %url, ?query, "Catalog request");

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::not_found(resource_label(resource), subject));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), resource, "Catalog request failed");
            return Err(Error::Transport {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ListResponse<T>>().await?)
    }
}

fn resource_label(resource: &str) -> &'static str {
    match resource {
        "playlists" => "Playlist",
        "playlistItems" => "Playlist items",
        _ => "Videos",
    }
}

#[async_trait]
impl CatalogApi for YouTubeDataClient {
    async fn playlist_snippet(&self, playlist: &PlaylistReference) -> Result<PlaylistSnippet> {
        let response: ListResponse<PlaylistResource> = self
            .get_list(
                "playlists",
                playlist.as_str(),
                &[("part", "snippet"), ("id", playlist.as_str())],
            )
            .await?;

        response
            .items
            .into_iter()
            .next()
            .map(|p| p.snippet)
            .ok_or_else(|| Error::not_found("Playlist", playlist.as_str()))
    }

    async fn playlist_items_page(
        &self,
        playlist: &PlaylistReference,
        page_token: Option<String>,
    ) -> Result<ItemPage> {
        let max_results = PAGE_SIZE.to_string();
        let mut query = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist.as_str()),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token.as_deref() {
            query.push(("pageToken", token));
        }

        let response: ListResponse<PlaylistItemResource> = self
            .get_list("playlistItems", playlist.as_str(), &query)
            .await?;

        Ok(ItemPage {
            video_ids: response
                .items
                .into_iter()
                .map(|item| item.content_details.video_id)
                .collect(),
            next_page_token: response.next_page_token,
        })
    }

    async fn video_batch(&self, ids: &[String]) -> Result<Vec<VideoResource>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = ids.join(",");

        let response: ListResponse<VideoResource> = self
            .get_list(
                "videos",
                &joined,
                &[("part", "snippet,contentDetails"), ("id", joined.as_str())],
            )
            .await?;

        Ok(response.items)
    }
}
