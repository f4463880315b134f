// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{LookupError, Result};
use crate::models::{ArtistRecord, LookupResponse, SearchQuery};
use arlo_config::{
    MusicBrainzConfig, DEFAULT_CONTACT, DEFAULT_MUSICBRAINZ_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;
use uuid::Uuid;

fn user_agent(contact: &str) -> String {
    format!("arlo/{} ( {} )", env!("CARGO_PKG_VERSION"), contact)
}

/// Plain MusicBrainz web service client.
///
/// No client-side throttling happens here; see [`ArtistLookup`](crate::ArtistLookup).
#[derive(Debug, Clone)]
pub struct MusicBrainzClient {
    client: Client,
    base_url: String,
}

impl MusicBrainzClient {
    /// Create a new MusicBrainz client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> MusicBrainzClientBuilder {
        MusicBrainzClientBuilder::default()
    }

    pub fn from_config(config: &MusicBrainzConfig) -> Result<Self> {
        Self::builder()
            .base_url(config.base_url.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .contact(config.contact.clone())
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the search URL for `query`.
    ///
    /// The artist search lives at `{base}/artist/` and takes a Lucene query in
    /// the `query` parameter, scoped here to the `artist` field.
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/artist/", self.base_url.trim_end_matches('/')))
            .map_err(|e| LookupError::InvalidUrl(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("query", &query.lucene())
            .append_pair("fmt", "json");

        if let Some(limit) = query.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }

        if let Some(offset) = query.offset {
            url.query_pairs_mut()
                .append_pair("offset", &offset.to_string());
        }

        Ok(url)
    }

    /// Search for artists by name.
    ///
    /// Only the requested page is fetched; `count` in the response tells how
    /// many matches exist in total.
    ///
    /// # Example
    /// ```no_run
    /// # use arlo_musicbrainz::{MusicBrainzClient, SearchQuery};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::new()?;
    /// let response = client.search_artists(SearchQuery::new("Radiohead").limit(10)).await?;
    /// for artist in response.artists {
    ///     println!("{} ({})", artist.name, artist.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_artists(&self, query: SearchQuery) -> Result<LookupResponse> {
        let url = self.search_url(&query)?;
        self.get(url).await
    }

    /// Look up an artist by MusicBrainz ID.
    ///
    /// # Example
    /// ```no_run
    /// # use arlo_musicbrainz::MusicBrainzClient;
    /// # use uuid::Uuid;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = MusicBrainzClient::new()?;
    /// let mbid = Uuid::parse_str("a74b1b7f-71a5-4011-9441-d0b5e4122711")?; // Radiohead
    /// let artist = client.lookup_artist(mbid).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn lookup_artist(&self, mbid: Uuid) -> Result<ArtistRecord> {
        let url = Url::parse(&format!(
            "{}/artist/{}?fmt=json",
            self.base_url.trim_end_matches('/'),
            mbid
        ))
        .map_err(|e| LookupError::InvalidUrl(e.to_string()))?;
        self.get(url).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        trace!(target: "musicbrainz", "GET {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        debug!(target: "musicbrainz", "response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(url.to_string()));
        }

        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(LookupError::RateLimited);
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LookupError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        trace!(target: "musicbrainz", "response body: {}", body);

        serde_json::from_str(&body)
            .map_err(|e| LookupError::Decode(format!("Failed to parse response: {}", e)))
    }
}

/// Builder for configuring a MusicBrainz client.
#[derive(Debug)]
pub struct MusicBrainzClientBuilder {
    base_url: String,
    timeout: Duration,
    contact: String,
}

impl Default for MusicBrainzClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MUSICBRAINZ_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            contact: DEFAULT_CONTACT.to_string(),
        }
    }
}

impl MusicBrainzClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Contact URL or e-mail placed in the `User-Agent`, as MusicBrainz asks of clients.
    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }

    pub fn build(self) -> Result<MusicBrainzClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(user_agent(&self.contact))
            .build()?;

        Ok(MusicBrainzClient {
            client,
            base_url: self.base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent("mailto:someone@example.org");
        assert!(ua.starts_with("arlo/"));
        assert!(ua.ends_with("( mailto:someone@example.org )"));
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = MusicBrainzClient::new().unwrap();
        let url = client.search_url(&SearchQuery::new("radio head")).unwrap();

        assert_eq!(url.path(), "/ws/2/artist/");
        assert_eq!(url.query(), Some("query=artist%3Aradio+head&fmt=json"));
    }

    #[test]
    fn test_search_url_escapes_reserved_characters() {
        let client = MusicBrainzClient::builder()
            .base_url("http://localhost:8080/ws/2/")
            .build()
            .unwrap();
        let url = client.search_url(&SearchQuery::new("AC/DC & friends")).unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("query".to_string(), "artist:AC/DC & friends".to_string()));
        assert_eq!(pairs[1], ("fmt".to_string(), "json".to_string()));
        assert_eq!(url.path(), "/ws/2/artist/");
    }

    #[test]
    fn test_builder_defaults_match_config() {
        let client = MusicBrainzClient::new().unwrap();
        assert_eq!(client.base_url(), MusicBrainzConfig::default().base_url);
    }

    #[test]
    fn test_invalid_base_url() {
        let client = MusicBrainzClient::builder()
            .base_url("not a url")
            .build()
            .unwrap();
        let err = client.search_url(&SearchQuery::new("x")).unwrap_err();
        assert!(matches!(err, LookupError::InvalidUrl(_)));
    }
}
