//! Typed decoding of raw response bodies.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{NetworkError, NetworkResult};
use crate::http::HttpResponse;

/// Decode the JSON body of `response` into `T`.
///
/// On a shape mismatch the error names the path of the first offending field,
/// e.g. `results[0].trackId`. Syntax errors carry no field.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> NetworkResult<T> {
    decode_slice(&response.body)
}

pub fn decode_slice<T: DeserializeOwned>(body: &[u8]) -> NetworkResult<T> {
    let deserializer = &mut serde_json::Deserializer::from_slice(body);
    let result: Result<T, _> = serde_path_to_error::deserialize(deserializer);
    result.map_err(|err| {
        let field = offending_field(&err);
        let inner = err.into_inner();
        let error = NetworkError::Decoding {
            field: if inner.is_syntax() || inner.is_eof() { None } else { field },
            message: inner.to_string(),
        };
        warn!(error = %error, "response decoding failed");
        error
    })
}

/// Full path of the field that failed. For a missing field the tracked path
/// stops at the parent object, so the field name is appended from the message.
fn offending_field(err: &serde_path_to_error::Error<serde_json::Error>) -> Option<String> {
    let path = err.path().to_string();
    let path = if path == "." { String::new() } else { path };

    let message = err.inner().to_string();
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());

    match (path.is_empty(), missing) {
        (true, Some(name)) => Some(name.to_string()),
        (false, Some(name)) => Some(format!("{path}.{name}")),
        (true, None) => None,
        (false, None) => Some(path),
    }
}
