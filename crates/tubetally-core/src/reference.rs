//! Playlist reference resolution.
//!
//! Turns free-form user input (a full URL or a bare identifier) into a
//! canonical [`PlaylistReference`].
//!
//! # Supported input formats
//!
//! - `PLxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx` - a bare 34-character identifier
//! - `https://www.youtube.com/playlist?list=PLxxxxxxxx`
//! - `https://www.youtube.com/watch?v=xxxxx&list=PLxxxxxxxx`
//! - `https://www.youtube.com/embed/videoseries?list=PLxxxxxxxx`
//!
//! ```rust
//! use tubetally_core::reference::resolve_reference;
//!
//! let reference = resolve_reference("https://www.youtube.com/playlist?list=PLabc123").unwrap();
//! assert_eq!(reference.as_str(), "PLabc123");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Length of a bare playlist identifier accepted verbatim.
pub const RAW_ID_LENGTH: usize = 34;

#[allow(clippy::expect_used)]
static RAW_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{34}$").expect("literal pattern"));

/// URL patterns tried in order; the first match wins.
#[allow(clippy::expect_used)]
static URL_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"[&?]list=([^&]+)").expect("literal pattern"),
        Regex::new(r"playlist\?list=([^&]+)").expect("literal pattern"),
        Regex::new(r"embed/videoseries\?list=([^&]+)").expect("literal pattern"),
    ]
});

/// Canonical identifier of a playlist.
///
/// Only constructed through [`resolve_reference`], so the wrapped value is
/// always non-empty and limited to `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlaylistReference(String);

impl PlaylistReference {
    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical playlist page URL for this identifier.
    #[must_use]
    pub fn playlist_url(&self) -> String {
        playlist_url(&self.0)
    }

    /// Consume the reference and return the inner identifier.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PlaylistReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PlaylistReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PlaylistReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve_reference(s)
    }
}

/// Playlist page URL for a playlist id.
#[must_use]
pub fn playlist_url(playlist_id: &str) -> String {
    format!("https://www.youtube.com/playlist?list={playlist_id}")
}

/// Resolve user input into a playlist reference.
///
/// A bare identifier is checked first so that a 34-character id is never
/// mistaken for a URL fragment.
pub fn resolve_reference(input: &str) -> Result<PlaylistReference> {
    let trimmed = input.trim();

    if RAW_ID_PATTERN.is_match(trimmed) {
        debug!(playlist_id = trimmed, "Accepted bare playlist identifier");
        return Ok(PlaylistReference(trimmed.to_string()));
    }

    let captured = URL_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(trimmed))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    let Some(value) = captured else {
        return Err(invalid(input));
    };

    // Fragments are not part of the query value.
    let value = value.split('#').next().unwrap_or_default().trim();

    if is_identifier(value) {
        debug!(playlist_id = value, "Extracted playlist identifier from URL");
        Ok(PlaylistReference(value.to_string()))
    } else {
        Err(invalid(input))
    }
}

fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn invalid(input: &str) -> Error {
    Error::InvalidReference {
        input: input.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const RAW_ID: &str = "PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf";

    #[test]
    fn test_raw_identifier_returned_unchanged() {
        assert_eq!(RAW_ID.len(), RAW_ID_LENGTH);
        let reference = resolve_reference(RAW_ID).unwrap();
        assert_eq!(reference.as_str(), RAW_ID);
    }

    #[test]
    fn test_raw_identifier_with_whitespace() {
        let reference = resolve_reference(&format!("  {RAW_ID}\n")).unwrap();
        assert_eq!(reference.as_str(), RAW_ID);
    }

    #[test]
    fn test_raw_identifier_with_underscore_and_hyphen() {
        let id = "PL_abc-DEF_ghi-JKL_mno-PQR_stu-VWX";
        assert_eq!(id.len(), RAW_ID_LENGTH);
        assert_eq!(resolve_reference(id).unwrap().as_str(), id);
    }

    #[test]
    fn test_playlist_url() {
        let reference = resolve_reference("https://x/playlist?list=ABC").unwrap();
        assert_eq!(reference.as_str(), "ABC");
    }

    #[test]
    fn test_embed_url() {
        let reference = resolve_reference("https://x/embed/videoseries?list=ABC").unwrap();
        assert_eq!(reference.as_str(), "ABC");
    }

    #[test]
    fn test_list_followed_by_other_params() {
        let reference = resolve_reference("https://x/y?list=ABC&z=1").unwrap();
        assert_eq!(reference.as_str(), "ABC");
    }

    #[test]
    fn test_watch_url_with_list() {
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLrAXtmErZgOtest";
        assert_eq!(resolve_reference(url).unwrap().as_str(), "PLrAXtmErZgOtest");
    }

    #[test]
    fn test_url_with_hash_fragment() {
        let url = "https://www.youtube.com/playlist?list=PLtest123#section";
        assert_eq!(resolve_reference(url).unwrap().as_str(), "PLtest123");
    }

    #[test]
    fn test_invalid_inputs() {
        for input in [
            "",
            "   ",
            "https://example.com",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/playlist?list=",
            "https://www.youtube.com/playlist?list=PL<script>",
            "short-id",
        ] {
            let err = resolve_reference(input).unwrap_err();
            assert!(
                matches!(err, Error::InvalidReference { .. }),
                "expected InvalidReference for {input:?}"
            );
        }
    }

    #[test]
    fn test_from_str_delegates_to_resolver() {
        let reference: PlaylistReference = "https://x/playlist?list=ABC".parse().unwrap();
        assert_eq!(reference.to_string(), "ABC");
        assert!("nothing here".parse::<PlaylistReference>().is_err());
    }

    #[test]
    fn test_playlist_url_format() {
        let reference = resolve_reference(RAW_ID).unwrap();
        assert_eq!(
            reference.playlist_url(),
            format!("https://www.youtube.com/playlist?list={RAW_ID}")
        );
        assert_eq!(reference.playlist_url(), playlist_url(RAW_ID));
    }
}
