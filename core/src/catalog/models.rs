//! Domain models mapped from catalog DTOs.

use std::time::Duration;

use crate::catalog::types::{CollectionRecord, TrackRecord, WrapperType};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub album_id: Option<i64>,
    pub duration: Option<Duration>,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub artwork_url: Option<String>,
    pub preview_url: Option<String>,
    pub genre: Option<String>,
}

impl Track {
    /// Duration as `m:ss`.
    pub fn formatted_duration(&self) -> Option<String> {
        self.duration.map(|d| {
            let secs = d.as_secs();
            format!("{}:{:02}", secs / 60, secs % 60)
        })
    }

    pub fn has_preview(&self) -> bool {
        self.preview_url.is_some()
    }

    /// `None` for records that are explicitly not tracks.
    pub fn from_record(record: TrackRecord) -> Option<Self> {
        match record.wrapper_type {
            None | Some(WrapperType::Track) => Some(record.into()),
            Some(_) => None,
        }
    }
}

impl From<TrackRecord> for Track {
    fn from(record: TrackRecord) -> Self {
        Self {
            id: record.track_id,
            title: record.track_name,
            artist: record.artist_name,
            album: record.collection_name,
            album_id: record.collection_id,
            duration: record.track_time_millis.map(Duration::from_millis),
            track_number: record.track_number,
            disc_number: record.disc_number,
            artwork_url: record.artwork_url,
            preview_url: record.preview_url,
            genre: record.primary_genre_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Album {
    pub id: i64,
    pub name: String,
    pub artist: String,
    pub artwork_url: Option<String>,
    pub track_count: Option<u32>,
    pub release_date: Option<String>,
    pub genre: Option<String>,
}

impl From<CollectionRecord> for Album {
    fn from(record: CollectionRecord) -> Self {
        Self {
            id: record.collection_id,
            name: record.collection_name,
            artist: record.artist_name,
            artwork_url: record.artwork_url,
            track_count: record.track_count,
            release_date: record.release_date,
            genre: record.primary_genre_name,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub tracks: Vec<Track>,
    pub total_count: u32,
    /// The page was full, so a further page may exist.
    pub has_more_results: bool,
}

/// An album and its tracks, sorted by disc then track number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumTracks {
    pub album: Option<Album>,
    pub tracks: Vec<Track>,
}

/// Stable sort by disc, then track number. Missing numbers sort last.
pub fn sort_album_order(tracks: &mut [Track]) {
    tracks.sort_by_key(|t| {
        (
            t.disc_number.unwrap_or(u32::MAX),
            t.track_number.unwrap_or(u32::MAX),
        )
    });
}
