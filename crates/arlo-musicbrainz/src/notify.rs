// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::LookupError;
use tracing::warn;

/// Receives lookup failures that [`ArtistLookup::lookup_or_empty`] swallows.
///
/// Presentation is up to the implementor: a log line, a toast, an inline
/// error row in a search box.
///
/// [`ArtistLookup::lookup_or_empty`]: crate::ArtistLookup::lookup_or_empty
pub trait FailureNotifier: Send + Sync {
    fn notify(&self, query: &str, error: &LookupError);
}

/// Logs failures at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl FailureNotifier for TracingNotifier {
    fn notify(&self, query: &str, error: &LookupError) {
        warn!(target: "lookup", query, "artist lookup failed: {}", error);
    }
}
