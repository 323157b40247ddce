use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub track_id: i64,
    pub track_name: String,
    pub artist_name: String,
    pub collection_id: i64,
    pub collection_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    pub track_number: u32,
    pub disc_number: u32,
    pub track_time_millis: u64,
    pub primary_genre_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub collection_id: i64,
    pub collection_name: String,
    pub artist_name: String,
    pub track_count: u32,
    pub primary_genre_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: String,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub id: i64,
}

#[derive(Debug, Default)]
pub struct Catalog {
    pub collections: Vec<Collection>,
    pub tracks: Vec<Track>,
}

pub type Db = Arc<Catalog>;

const DEFAULT_LIMIT: usize = 50;

/// Two small albums, enough to exercise search, paging and lookup ordering.
pub fn seed() -> Catalog {
    let collections = vec![
        Collection {
            collection_id: 100,
            collection_name: "In Between Dreams".to_string(),
            artist_name: "Jack Johnson".to_string(),
            track_count: 3,
            primary_genre_name: "Rock".to_string(),
        },
        Collection {
            collection_id: 200,
            collection_name: "Homogenic".to_string(),
            artist_name: "Björk".to_string(),
            track_count: 2,
            primary_genre_name: "Alternative".to_string(),
        },
    ];
    let track = |id: i64,
                 name: &str,
                 collection: &Collection,
                 disc: u32,
                 number: u32,
                 preview: bool| Track {
        track_id: id,
        track_name: name.to_string(),
        artist_name: collection.artist_name.clone(),
        collection_id: collection.collection_id,
        collection_name: collection.collection_name.clone(),
        preview_url: preview.then(|| format!("https://audio.example.com/{id}.m4a")),
        track_number: number,
        disc_number: disc,
        track_time_millis: 180_000 + id as u64 * 1_000,
        primary_genre_name: collection.primary_genre_name.clone(),
    };
    // Stored out of album order on purpose.
    let tracks = vec![
        track(3, "Sitting, Waiting, Wishing", &collections[0], 1, 3, true),
        track(1, "Better Together", &collections[0], 1, 1, true),
        track(2, "Never Know", &collections[0], 1, 2, false),
        track(5, "Bachelorette", &collections[1], 1, 2, true),
        track(4, "Hunter", &collections[1], 1, 1, true),
    ];
    Catalog {
        collections,
        tracks,
    }
}

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    Router::new()
        .route("/search", get(search))
        .route("/lookup", get(lookup))
        .route("/echo", get(echo))
        .route("/status/{code}", get(status))
        .route("/slow/{millis}", get(slow))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn page(results: Vec<Value>) -> Json<Value> {
    Json(json!({ "resultCount": results.len(), "results": results }))
}

fn track_json(track: &Track) -> Value {
    let mut value = json!(track);
    value["wrapperType"] = json!("track");
    value["kind"] = json!("song");
    value
}

async fn search(State(db): State<Db>, Query(params): Query<SearchParams>) -> Json<Value> {
    let needle = params.term.to_lowercase();
    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    tracing::debug!(term = %params.term, country = ?params.country, offset, limit, "search");

    let mut matches: Vec<&Track> = db
        .tracks
        .iter()
        .filter(|t| {
            t.track_name.to_lowercase().contains(&needle)
                || t.artist_name.to_lowercase().contains(&needle)
        })
        .collect();
    matches.sort_by_key(|t| t.track_id);

    let results = matches
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(track_json)
        .collect();
    page(results)
}

async fn lookup(State(db): State<Db>, Query(params): Query<LookupParams>) -> Json<Value> {
    let Some(collection) = db
        .collections
        .iter()
        .find(|c| c.collection_id == params.id)
    else {
        return page(Vec::new());
    };

    let mut collection_json = json!(collection);
    collection_json["wrapperType"] = json!("collection");
    let mut results = vec![collection_json];
    results.extend(
        db.tracks
            .iter()
            .filter(|t| t.collection_id == collection.collection_id)
            .map(track_json),
    );
    page(results)
}

/// Reflects request headers and the raw query back as JSON.
async fn echo(
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    Json(json!({ "headers": headers, "query": query }))
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, format!("status {code}")))
}

async fn slow(Path(millis): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    page(Vec::new())
}
