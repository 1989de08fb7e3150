//! Error handling for the command line front-end.

use tracing::error;
use tubetally_core::{Error, ErrorKind};

use crate::logging::LoggingError;

/// Errors surfaced to the user by the binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A calculation or configuration step in the core failed.
    #[error(transparent)]
    Core(#[from] Error),

    /// Logging could not be set up.
    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// Output could not be rendered.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl CliError {
    /// Category of the failure, for structured output.
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Core(e) => Some(e.kind()),
            Self::Logging(_) | Self::Render(_) => None,
        }
    }

    /// Process exit code for this failure.
    ///
    /// | code | meaning                        |
    /// |------|--------------------------------|
    /// | 2    | bad playlist reference or range |
    /// | 3    | playlist not found or empty    |
    /// | 4    | catalog request failed         |
    /// | 5    | configuration problem          |
    /// | 1    | anything else                  |
    pub const fn exit_code(&self) -> u8 {
        match self.kind() {
            Some(ErrorKind::InvalidReference | ErrorKind::InvalidRange) => 2,
            Some(ErrorKind::NotFound) => 3,
            Some(ErrorKind::Transport) => 4,
            Some(ErrorKind::Configuration) => 5,
            None => 1,
        }
    }

    /// Extra guidance printed under the error message.
    pub const fn hint(&self) -> Option<&'static str> {
        match self.kind() {
            Some(ErrorKind::InvalidReference) => Some(
                "Pass a playlist URL (https://www.youtube.com/playlist?list=...) or a 34-character playlist ID",
            ),
            Some(ErrorKind::NotFound) => Some("The playlist may be private, deleted or empty"),
            Some(ErrorKind::Configuration) => Some(
                "Provide an API key with --api-key, TUBETALLY_API_KEY or the config file",
            ),
            _ => None,
        }
    }
}

/// Structured error written to stdout in `--json` mode.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub message: String,
    /// Error category for programmatic handling.
    pub kind: Option<ErrorKind>,
    /// Whether the same request may succeed if repeated.
    pub retryable: bool,
}

impl From<&CliError> for ErrorResponse {
    fn from(e: &CliError) -> Self {
        Self {
            message: e.to_string(),
            kind: e.kind(),
            retryable: matches!(e, CliError::Core(inner) if inner.is_retryable()),
        }
    }
}

/// Log `e` and render it for the terminal.
pub fn render_error(e: &CliError, json: bool) -> String {
    error!(kind = ?e.kind(), exit_code = e.exit_code(), "Command failed: {e}");

    if json {
        let response = ErrorResponse::from(e);
        return serde_json::to_string_pretty(&response).unwrap_or_else(|_| e.to_string());
    }

    match e.hint() {
        Some(hint) => format!("error: {e}\n  hint: {hint}"),
        None => format!("error: {e}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tubetally_core::RangeError;

    use super::*;

    #[test]
    fn test_exit_codes() {
        let invalid: CliError = Error::InvalidReference {
            input: "x".to_string(),
        }
        .into();
        assert_eq!(invalid.exit_code(), 2);

        let range: CliError = Error::from(RangeError::Reversed).into();
        assert_eq!(range.exit_code(), 2);

        let missing: CliError = Error::not_found("Playlist", "PLx").into();
        assert_eq!(missing.exit_code(), 3);

        let transport: CliError = Error::Transport {
            status: 503,
            message: String::new(),
        }
        .into();
        assert_eq!(transport.exit_code(), 4);

        let config: CliError = Error::configuration("no key").into();
        assert_eq!(config.exit_code(), 5);
    }

    #[test]
    fn test_render_plain_with_hint() {
        let e: CliError = Error::not_found("Playlist", "PLx").into();
        let rendered = render_error(&e, false);
        assert!(rendered.starts_with("error: Playlist not found: PLx"));
        assert!(rendered.contains("hint:"));
    }

    #[test]
    fn test_render_plain_range_message() {
        let e: CliError = Error::from(RangeError::ExceedsCount { count: 10 }).into();
        assert_eq!(
            render_error(&e, false),
            "error: Invalid video range: Video numbers cannot exceed 10"
        );
    }

    #[test]
    fn test_render_json() {
        let e: CliError = Error::from(RangeError::Reversed).into();
        let rendered = render_error(&e, true);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["kind"], "InvalidRange");
        assert_eq!(value["retryable"], false);
        assert!(value["message"].as_str().unwrap().contains("less than or equal"));
    }
}
