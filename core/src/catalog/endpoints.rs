//! Endpoint descriptors for the catalog API.

use crate::catalog::types::{LookupResponse, SearchResponse};
use crate::endpoint::Endpoint;

fn json_accept() -> Vec<(String, String)> {
    vec![("Accept".to_string(), "application/json".to_string())]
}

/// Song search by free text.
///
/// `term` is always sent; `limit`, `offset` and `country` only when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint {
    term: String,
    limit: Option<u32>,
    offset: Option<u32>,
    country: Option<String>,
}

impl SearchEndpoint {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            limit: None,
            offset: None,
            country: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Two-letter storefront code, e.g. `US` or `BR`.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }
}

impl Endpoint for SearchEndpoint {
    type Response = SearchResponse;

    fn path(&self) -> String {
        "search".to_string()
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("term".to_string(), self.term.clone()),
            ("entity".to_string(), "song".to_string()),
            ("media".to_string(), "music".to_string()),
        ];
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(country) = &self.country {
            query.push(("country".to_string(), country.clone()));
        }
        query
    }

    fn headers(&self) -> Vec<(String, String)> {
        json_accept()
    }
}

/// All songs of one album, looked up by collection id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlbumTracksEndpoint {
    collection_id: i64,
}

impl AlbumTracksEndpoint {
    pub fn new(collection_id: i64) -> Self {
        Self { collection_id }
    }
}

impl Endpoint for AlbumTracksEndpoint {
    type Response = LookupResponse;

    fn path(&self) -> String {
        "lookup".to_string()
    }

    fn query(&self) -> Vec<(String, String)> {
        vec![
            ("id".to_string(), self.collection_id.to_string()),
            ("entity".to_string(), "song".to_string()),
            ("media".to_string(), "music".to_string()),
        ]
    }

    fn headers(&self) -> Vec<(String, String)> {
        json_accept()
    }
}
