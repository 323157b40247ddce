//! Response DTOs for the catalog API.
//!
//! # Design
//! Field names mirror the remote JSON (camelCase). Only the fields a track
//! cannot be displayed without are required; everything else is optional so
//! one sparse record never fails a whole page. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Body of a `search` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_count: u32,
    pub results: Vec<TrackRecord>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WrapperType {
    Track,
    Collection,
    Artist,
    #[serde(other)]
    Other,
}

/// A single track as returned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    pub track_id: i64,
    pub track_name: String,
    pub artist_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    #[serde(default, rename = "artworkUrl100", skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_time_millis: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disc_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_genre_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper_type: Option<WrapperType>,
}

/// An album header as returned by `lookup`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    pub collection_id: i64,
    pub collection_name: String,
    pub artist_name: String,
    #[serde(default, rename = "artworkUrl100", skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_genre_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// Entry of a `lookup` response, discriminated by `wrapperType`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "wrapperType", rename_all = "lowercase")]
pub enum LookupRecord {
    Collection(CollectionRecord),
    Track(TrackRecord),
    #[serde(other)]
    Other,
}

/// Body of a `lookup` response: usually one collection followed by its tracks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub result_count: u32,
    pub results: Vec<LookupRecord>,
}
