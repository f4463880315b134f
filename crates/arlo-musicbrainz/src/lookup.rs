// SPDX-License-Identifier: GPL-3.0-or-later

use crate::client::MusicBrainzClient;
use crate::error::{LookupError, Result};
use crate::models::{ArtistRecord, LookupResponse, SearchQuery};
use crate::notify::{FailureNotifier, TracingNotifier};
use crate::throttle::Throttle;
use arlo_config::{MusicBrainzConfig, DEFAULT_THROTTLE_WINDOW_MS};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default throttle window for interactive artist search.
pub const DEFAULT_THROTTLE_WINDOW: Duration = Duration::from_millis(DEFAULT_THROTTLE_WINDOW_MS);

/// Throttled artist search, meant to be called on every keystroke.
///
/// Clones share one throttle window. Separately constructed instances are
/// independent of each other.
#[derive(Clone)]
pub struct ArtistLookup {
    client: MusicBrainzClient,
    throttle: Arc<Throttle>,
    notifier: Arc<dyn FailureNotifier>,
}

impl std::fmt::Debug for ArtistLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtistLookup")
            .field("client", &self.client)
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}

impl ArtistLookup {
    pub fn new(client: MusicBrainzClient, window: Duration) -> Self {
        Self {
            client,
            throttle: Arc::new(Throttle::new(window)),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn from_config(config: &MusicBrainzConfig) -> Result<Self> {
        let client = MusicBrainzClient::from_config(config)?;
        Ok(Self::new(
            client,
            Duration::from_millis(config.throttle_window_ms),
        ))
    }

    /// Replace the failure notifier used by [`lookup_or_empty`](Self::lookup_or_empty).
    pub fn with_notifier(mut self, notifier: impl FailureNotifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    pub fn client(&self) -> &MusicBrainzClient {
        &self.client
    }

    pub fn window(&self) -> Duration {
        self.throttle.window()
    }

    /// Search artists matching `query`, first page only, in server order.
    ///
    /// Returns [`LookupError::Throttled`] without touching the network when a
    /// previous call opened a throttle window that is still active.
    pub async fn lookup(&self, query: &str) -> Result<Vec<ArtistRecord>> {
        // A request that cannot be built must not open a window.
        let url = self.client.search_url(&SearchQuery::new(query))?;

        if !self.throttle.acquire_now() {
            debug!(target: "lookup", query, "dropped by throttle");
            return Err(LookupError::Throttled);
        }

        let response: LookupResponse = self.client.get(url).await?;
        debug!(
            target: "lookup",
            query,
            count = response.count,
            returned = response.artists.len(),
            "artist search completed"
        );
        Ok(response.artists)
    }

    /// Like [`lookup`](Self::lookup) but never fails.
    ///
    /// Any failure is reported once to the notifier and yields an empty list.
    /// Throttled calls yield an empty list without a notification.
    pub async fn lookup_or_empty(&self, query: &str) -> Vec<ArtistRecord> {
        match self.lookup(query).await {
            Ok(artists) => artists,
            Err(err) => {
                if err.is_failure() {
                    self.notifier.notify(query, &err);
                }
                Vec::new()
            }
        }
    }
}
