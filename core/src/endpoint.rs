//! The endpoint capability: what to request, independent of how it is sent.
//!
//! # Design
//! An endpoint derives its path, method, query, headers and body from its own
//! fields only. No I/O happens here. Each endpoint names the DTO its response
//! decodes into, so `ApiClient::send` is typed end to end.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{NetworkError, NetworkResult};
use crate::http::HttpMethod;

pub trait Endpoint: Send + Sync {
    /// Shape of a successful response body.
    type Response: DeserializeOwned;

    /// Path relative to the configured base URL.
    fn path(&self) -> String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    /// Ordered query pairs, unencoded.
    fn query(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Headers that override the configuration defaults.
    fn headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<Vec<u8>> {
        None
    }
}

/// Serialize a request payload as JSON for use as an endpoint body.
pub fn json_body<T: Serialize + ?Sized>(payload: &T) -> NetworkResult<Vec<u8>> {
    serde_json::to_vec(payload)
        .map_err(|e| NetworkError::invalid_request(format!("body serialization failed: {e}")))
}
