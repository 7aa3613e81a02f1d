//! Error types for headshot transformation.

use std::time::Duration;

/// Errors that can occur while loading, transforming or exporting a photo.
#[derive(Debug, thiserror::Error)]
pub enum ProPhotoError {
    /// The call completed but produced no usable image content.
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// Content was blocked by provider safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// API key missing or invalid.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Quota or rate limit rejection.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Wait requested by the server, when it sent one.
        retry_after: Option<Duration>,
    },

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        message: String,
    },

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed data URI or base64 payload.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// Option value outside the accepted set.
    #[error("invalid value {value:?} for option {key}")]
    InvalidOption {
        /// Option that was being set.
        key: &'static str,
        /// Rejected value as given.
        value: String,
    },

    /// I/O error (reading the photo, writing the export).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProPhotoError {
    /// Returns true when the provider answered but returned no image.
    ///
    /// Every other variant raised by a transform is a service failure.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::GenerationFailed(_) | Self::ContentBlocked(_))
    }
}

/// Result type alias for headshot operations.
pub type Result<T> = std::result::Result<T, ProPhotoError>;

/// Maximum length of provider error text kept in an error message.
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Trims provider error bodies to something safe to log.
///
/// Collapses whitespace and truncates on a char boundary.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_ERROR_MESSAGE_LEN {
        return collapsed;
    }
    let mut truncated: String = collapsed.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
    truncated.push_str("...");
    truncated
}

/// Reads a `Retry-After` header given in whole seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
