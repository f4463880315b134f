// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LookupError>;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("MusicBrainz returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("MusicBrainz rate limit exceeded")]
    RateLimited,

    #[error("Invalid response from MusicBrainz API: {0}")]
    Decode(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Lookup dropped by throttle")]
    Throttled,
}

impl LookupError {
    /// Whether the error should be surfaced to the user as a failed lookup.
    ///
    /// Throttled calls are an expected outcome of rapid input and are not
    /// failures.
    pub fn is_failure(&self) -> bool {
        !matches!(self, LookupError::Throttled)
    }
}
