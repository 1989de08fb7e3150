//! Error types for Tubetally core operations.
//!
//! Every failure of a calculation falls into one of a handful of kinds
//! (see [`ErrorKind`]). All of them are terminal for the current calculation:
//! nothing in this crate retries on its own, and the caller is expected to
//! wait for new user input before trying again.

use std::path::PathBuf;

use thiserror::Error;

use crate::range::RangeError;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving and aggregating a playlist.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is neither a playlist identifier nor a URL carrying one.
    #[error("Invalid YouTube playlist URL or ID: {input}")]
    InvalidReference {
        /// The raw input that failed to resolve.
        input: String,
    },

    /// The playlist (or its items) does not exist or is not accessible.
    #[error("{what} not found: {id}")]
    NotFound {
        /// What was looked up ("Playlist", "Playlist items", ...).
        what: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The playlist exists but lists no videos.
    #[error("No videos found in playlist {id}")]
    EmptyPlaylist {
        /// Identifier of the playlist.
        id: String,
    },

    /// The requested position range is not valid for the playlist.
    #[error("Invalid video range: {0}")]
    InvalidRange(#[from] RangeError),

    /// The catalog API answered with a non-success status.
    #[error("Catalog request failed ({status}): {message}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The HTTP exchange itself failed (connect, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration file could not be read or written.
    #[error("File system error at {path}: {message}")]
    FileSystem {
        /// Path where the error occurred.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of [`Error`] for callers that map failures to
/// user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ErrorKind {
    /// Unparseable playlist reference.
    InvalidReference,
    /// Playlist or items absent or inaccessible.
    NotFound,
    /// Range failed validation.
    InvalidRange,
    /// Network or HTTP failure at any stage.
    Transport,
    /// Local configuration problem.
    Configuration,
}

impl Error {
    /// Shorthand for a [`Error::NotFound`] error.
    pub fn not_found(what: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            id: id.into(),
        }
    }

    /// Shorthand for a [`Error::Configuration`] error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidReference { .. } => ErrorKind::InvalidReference,
            Self::NotFound { .. } | Self::EmptyPlaylist { .. } => ErrorKind::NotFound,
            Self::InvalidRange(_) => ErrorKind::InvalidRange,
            Self::Transport { .. } | Self::Http(_) | Self::Serialization(_) => {
                ErrorKind::Transport
            }
            Self::Configuration(_) | Self::FileSystem { .. } => ErrorKind::Configuration,
        }
    }

    /// Whether the caller may retry without new input. Always `false`:
    /// a failed calculation is only re-run on a fresh user request.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}
