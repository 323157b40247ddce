//! High-level catalog operations over an `ApiClient`.

use tracing::{debug, instrument};

use crate::catalog::endpoints::{AlbumTracksEndpoint, SearchEndpoint};
use crate::catalog::models::{sort_album_order, Album, AlbumTracks, SearchResult, Track};
use crate::catalog::types::LookupRecord;
use crate::client::ApiClient;
use crate::config::NetworkConfiguration;
use crate::error::NetworkResult;
use crate::http::HttpClient;

pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// Errors are returned exactly as the pipeline produced them.
#[derive(Debug)]
pub struct CatalogRepository<C> {
    api: ApiClient<C>,
}

impl<C: HttpClient> CatalogRepository<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self { api }
    }

    /// Repository against the public catalog at [`DEFAULT_BASE_URL`].
    pub fn with_default_base_url(http: C) -> Self {
        Self::new(ApiClient::new(NetworkConfiguration::new(DEFAULT_BASE_URL), http))
    }

    pub fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    #[instrument(skip(self))]
    pub async fn search_tracks(
        &self,
        term: &str,
        limit: u32,
        offset: u32,
    ) -> NetworkResult<SearchResult> {
        let endpoint = SearchEndpoint::new(term)
            .with_limit(limit)
            .with_offset(offset);
        let response = self.api.send(&endpoint).await?;

        let tracks: Vec<Track> = response
            .results
            .into_iter()
            .filter_map(Track::from_record)
            .collect();
        debug!(returned = tracks.len(), total = response.result_count, "search complete");
        Ok(SearchResult {
            has_more_results: limit > 0 && response.result_count >= limit,
            total_count: response.result_count,
            tracks,
        })
    }

    #[instrument(skip(self))]
    pub async fn album_tracks(&self, collection_id: i64) -> NetworkResult<AlbumTracks> {
        let response = self.api.send(&AlbumTracksEndpoint::new(collection_id)).await?;

        let mut album = None;
        let mut tracks = Vec::new();
        for record in response.results {
            match record {
                LookupRecord::Collection(collection) if album.is_none() => {
                    album = Some(Album::from(collection));
                }
                LookupRecord::Track(track) => tracks.push(Track::from(track)),
                _ => {}
            }
        }
        sort_album_order(&mut tracks);
        debug!(tracks = tracks.len(), "album lookup complete");
        Ok(AlbumTracks { album, tracks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use crate::mock::MockHttpClient;

    fn repository(mock: MockHttpClient) -> CatalogRepository<MockHttpClient> {
        CatalogRepository::new(ApiClient::new(
            NetworkConfiguration::new("https://itunes.apple.com"),
            mock,
        ))
    }

    #[tokio::test]
    async fn search_maps_tracks() {
        let repo = repository(MockHttpClient::json(
            200,
            r#"{"resultCount":2,"results":[
                {"wrapperType":"track","trackId":1,"trackName":"A","artistName":"B","previewUrl":"http://x"},
                {"wrapperType":"collection","trackId":2,"trackName":"C","artistName":"D"}
            ]}"#,
        ));
        let result = repo.search_tracks("jack johnson", 2, 0).await.unwrap();
        assert_eq!(result.tracks.len(), 1);
        assert_eq!(result.tracks[0].title, "A");
        assert_eq!(result.total_count, 2);
        assert!(result.has_more_results);

        let requests = repo.api().http_client().requests();
        assert_eq!(
            requests[0].url,
            "https://itunes.apple.com/search?term=jack+johnson&entity=song&media=music&limit=2&offset=0"
        );
    }

    #[tokio::test]
    async fn short_page_has_no_more_results() {
        let repo = repository(MockHttpClient::json(200, r#"{"resultCount":0,"results":[]}"#));
        let result = repo.search_tracks("nothing", 50, 0).await.unwrap();
        assert!(result.tracks.is_empty());
        assert!(!result.has_more_results);
    }

    #[tokio::test]
    async fn album_tracks_are_sorted() {
        let repo = repository(MockHttpClient::json(
            200,
            r#"{"resultCount":4,"results":[
                {"wrapperType":"collection","collectionId":10,"collectionName":"Album","artistName":"B"},
                {"wrapperType":"track","trackId":3,"trackName":"Three","artistName":"B","discNumber":2,"trackNumber":1},
                {"wrapperType":"track","trackId":2,"trackName":"Two","artistName":"B","discNumber":1,"trackNumber":2},
                {"wrapperType":"track","trackId":1,"trackName":"One","artistName":"B","discNumber":1,"trackNumber":1}
            ]}"#,
        ));
        let album = repo.album_tracks(10).await.unwrap();
        assert_eq!(album.album.as_ref().map(|a| a.name.as_str()), Some("Album"));
        let ids: Vec<i64> = album.tracks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn errors_pass_through() {
        let repo = repository(MockHttpClient::json(404, ""));
        let err = repo.album_tracks(10).await.unwrap_err();
        assert_eq!(
            err,
            NetworkError::InvalidResponse {
                status: 404,
                body: None
            }
        );
    }
}
