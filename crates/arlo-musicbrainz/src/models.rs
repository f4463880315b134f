// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One artist matched by a MusicBrainz search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtistRecord {
    /// Artist name.
    pub name: String,
    /// Opaque MusicBrainz identifier (normally an MBID).
    pub id: String,
    /// Artist type (e.g., "Person", "Group").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub artist_type: Option<String>,
    /// Country code (ISO 3166-1 alpha-2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Artist sort name.
    #[serde(rename = "sort-name", default, skip_serializing_if = "Option::is_none")]
    pub sort_name: Option<String>,
    /// Disambiguation comment (e.g., "US hip hop artist").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disambiguation: Option<String>,
    /// Search score (only present in search results).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl ArtistRecord {
    /// Parse the identifier as an MBID, if it is one.
    pub fn mbid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.id).ok()
    }
}

/// First page of an artist search.
///
/// `artists.len()` is not necessarily `count`: the service paginates and only
/// the page starting at `offset` is included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupResponse {
    /// Creation timestamp.
    pub created: String,
    /// Total number of matches on the server.
    pub count: u32,
    /// Offset used for this page.
    pub offset: u32,
    pub artists: Vec<ArtistRecord>,
}

/// Search query parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Free-text artist query.
    pub query: String,
    /// Maximum number of results (default 25, max 100).
    pub limit: Option<u32>,
    /// Offset for pagination (default 0).
    pub offset: Option<u32>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            offset: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Lucene query sent to the search endpoint, scoped to the artist field.
    pub(crate) fn lucene(&self) -> String {
        format!("artist:{}", self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_artist_decodes() {
        let record: ArtistRecord =
            serde_json::from_str(r#"{"name": "Björk", "id": "not-a-uuid"}"#).unwrap();
        assert_eq!(record.name, "Björk");
        assert_eq!(record.artist_type, None);
        assert_eq!(record.country, None);
        assert_eq!(record.mbid(), None);
    }

    #[test]
    fn test_mbid_parses() {
        let record = ArtistRecord {
            name: "Radiohead".to_string(),
            id: "a74b1b7f-71a5-4011-9441-d0b5e4122711".to_string(),
            artist_type: Some("Group".to_string()),
            country: Some("GB".to_string()),
            sort_name: None,
            disambiguation: None,
            score: None,
        };
        assert!(record.mbid().is_some());
    }

    #[test]
    fn test_response_page_shorter_than_count() {
        let body = serde_json::json!({
            "created": "2026-01-08T12:00:00.000Z",
            "count": 412,
            "offset": 0,
            "artists": [{ "id": "x", "name": "John", "type": "Person" }]
        });
        let response: LookupResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.count, 412);
        assert_eq!(response.artists.len(), 1);
        assert_eq!(response.artists[0].artist_type.as_deref(), Some("Person"));
    }

    #[test]
    fn test_search_query_builder() {
        let query = SearchQuery::new("radio head").limit(5).offset(10);
        assert_eq!(query.lucene(), "artist:radio head");
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.offset, Some(10));
    }
}
