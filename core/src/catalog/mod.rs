//! Music-catalog search integration.
//!
//! # Overview
//! A thin consumer of the networking core: endpoint descriptors for the
//! catalog's `search` and `lookup` operations, the DTOs their responses decode
//! into, domain models mapped from those DTOs, and a repository that ties them
//! to an `ApiClient`.

pub mod endpoints;
pub mod models;
pub mod repository;
pub mod types;

pub use endpoints::{AlbumTracksEndpoint, SearchEndpoint};
pub use models::{Album, AlbumTracks, SearchResult, Track};
pub use repository::{CatalogRepository, DEFAULT_BASE_URL};
pub use types::{
    CollectionRecord, LookupRecord, LookupResponse, SearchResponse, TrackRecord, WrapperType,
};
