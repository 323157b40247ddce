//! Turns an endpoint plus configuration into a transport-ready request.
//!
//! # Design
//! `build` is a pure function: the same endpoint and configuration always
//! yield the same `HttpRequest`, and nothing outside its two arguments
//! influences the result. Malformed input is reported as
//! `NetworkError::InvalidRequest` before any I/O is attempted.

use std::sync::Arc;

use tracing::debug;
use url::{form_urlencoded, Url};

use crate::config::NetworkConfiguration;
use crate::endpoint::Endpoint;
use crate::error::{NetworkError, NetworkResult};
use crate::http::HttpRequest;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Builds requests against a fixed configuration.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    config: Arc<NetworkConfiguration>,
}

impl RequestBuilder {
    pub fn new(config: Arc<NetworkConfiguration>) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &NetworkConfiguration {
        &self.config
    }

    pub fn build<E: Endpoint + ?Sized>(&self, endpoint: &E) -> NetworkResult<HttpRequest> {
        build(endpoint, &self.config)
    }
}

/// Build the request for `endpoint` under `config`.
pub fn build<E: Endpoint + ?Sized>(
    endpoint: &E,
    config: &NetworkConfiguration,
) -> NetworkResult<HttpRequest> {
    let base = validated_base(config.base_url())?;
    let url = compose_url(&base, &endpoint.path(), &endpoint.query())?;

    let headers = merge_headers(config.default_headers(), endpoint.headers())?;
    let body = endpoint.body();
    let headers = if body.is_some() {
        with_default_content_type(headers)
    } else {
        headers
    };

    let request = HttpRequest {
        method: endpoint.method(),
        url,
        headers,
        body,
    };
    debug!(method = %request.method, url = %request.url, "built request");
    Ok(request)
}

fn validated_base(raw: &str) -> NetworkResult<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(NetworkError::invalid_request("base URL is empty"));
    }
    let parsed = Url::parse(raw).map_err(|e| {
        NetworkError::invalid_request(format!("base URL `{raw}` is malformed: {e}"))
    })?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(NetworkError::invalid_request(format!(
            "base URL `{raw}` must be an absolute http(s) URL"
        )));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(NetworkError::invalid_request(format!(
            "base URL `{raw}` must not carry a query or fragment"
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Join base and path with exactly one slash and append the encoded query.
/// Each path segment is percent-encoded, so `?`, `#` and spaces stay inside
/// the path. An empty query adds no `?`.
fn compose_url(base: &str, path: &str, query: &[(String, String)]) -> NetworkResult<String> {
    let mut url = Url::parse(base).map_err(|e| {
        NetworkError::invalid_request(format!("base URL `{base}` is malformed: {e}"))
    })?;
    url.path_segments_mut()
        .map_err(|()| {
            NetworkError::invalid_request(format!("base URL `{base}` cannot carry a path"))
        })?
        .pop_if_empty()
        .extend(path.trim_start_matches('/').split('/'));
    if !query.is_empty() {
        url.set_query(Some(&encode_query(query)));
    }
    Ok(url.into())
}

/// Form-urlencode each key and value, preserving order.
pub fn encode_query(query: &[(String, String)]) -> String {
    query
        .iter()
        .map(|(key, value)| {
            let key: String = form_urlencoded::byte_serialize(key.as_bytes()).collect();
            let value: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
            format!("{key}={value}")
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Defaults first, then endpoint headers; an endpoint header replaces any
/// default with the same name regardless of case.
fn merge_headers(
    defaults: &[(String, String)],
    overrides: Vec<(String, String)>,
) -> NetworkResult<Vec<(String, String)>> {
    let mut merged: Vec<(String, String)> = Vec::with_capacity(defaults.len() + overrides.len());
    for (name, value) in defaults.iter().cloned().chain(overrides) {
        validate_header(&name, &value)?;
        merged.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        merged.push((name, value));
    }
    Ok(merged)
}

fn validate_header(name: &str, value: &str) -> NetworkResult<()> {
    let valid_name = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_graphic() && b != b':');
    if !valid_name {
        return Err(NetworkError::invalid_request(format!(
            "header name `{name}` is not a valid token"
        )));
    }
    if value.bytes().any(|b| b == b'\r' || b == b'\n') {
        return Err(NetworkError::invalid_request(format!(
            "header `{name}` contains a line break"
        )));
    }
    Ok(())
}

fn with_default_content_type(mut headers: Vec<(String, String)>) -> Vec<(String, String)> {
    let has_content_type = headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
    if !has_content_type {
        headers.push(("Content-Type".to_string(), DEFAULT_CONTENT_TYPE.to_string()));
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    #[derive(Default)]
    struct TestEndpoint {
        path: String,
        method: Option<HttpMethod>,
        query: Vec<(String, String)>,
        headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    }

    impl TestEndpoint {
        fn search() -> Self {
            Self {
                path: "search".to_string(),
                query: vec![("term".to_string(), "test".to_string())],
                headers: vec![("Accept".to_string(), "application/json".to_string())],
                ..Default::default()
            }
        }
    }

    impl Endpoint for TestEndpoint {
        type Response = serde_json::Value;

        fn path(&self) -> String {
            self.path.clone()
        }

        fn method(&self) -> HttpMethod {
            self.method.unwrap_or(HttpMethod::Get)
        }

        fn query(&self) -> Vec<(String, String)> {
            self.query.clone()
        }

        fn headers(&self) -> Vec<(String, String)> {
            self.headers.clone()
        }

        fn body(&self) -> Option<Vec<u8>> {
            self.body.clone()
        }
    }

    fn config(base: &str) -> NetworkConfiguration {
        NetworkConfiguration::new(base)
    }

    #[test]
    fn builds_basic_get() {
        let req = build(&TestEndpoint::search(), &config("https://itunes.apple.com")).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://itunes.apple.com/search?term=test");
        assert_eq!(req.header("accept"), Some("application/json"));
        assert!(req.body.is_none());
    }

    #[test]
    fn exactly_one_slash_between_base_and_path() {
        for (base, path) in [
            ("https://api.example.com", "users"),
            ("https://api.example.com/", "users"),
            ("https://api.example.com", "/users"),
            ("https://api.example.com//", "//users"),
        ] {
            let endpoint = TestEndpoint {
                path: path.to_string(),
                ..Default::default()
            };
            let req = build(&endpoint, &config(base)).unwrap();
            assert_eq!(req.url, "https://api.example.com/users", "{base} + {path}");
        }
    }

    #[test]
    fn nested_base_path_is_kept() {
        let endpoint = TestEndpoint {
            path: "users/123/posts".to_string(),
            query: vec![("term".to_string(), "test".to_string())],
            ..Default::default()
        };
        let req = build(&endpoint, &config("https://api.example.com/v1")).unwrap();
        assert_eq!(req.url, "https://api.example.com/v1/users/123/posts?term=test");
    }

    #[test]
    fn empty_path_resolves_to_base() {
        let endpoint = TestEndpoint {
            query: vec![("term".to_string(), "test".to_string())],
            ..Default::default()
        };
        let req = build(&endpoint, &config("https://itunes.apple.com")).unwrap();
        assert_eq!(req.url, "https://itunes.apple.com/?term=test");
    }

    #[test]
    fn reserved_characters_in_path_are_encoded() {
        let endpoint = TestEndpoint {
            path: "tracks/AC#DC?live now".to_string(),
            query: vec![("term".to_string(), "x".to_string())],
            ..Default::default()
        };
        let req = build(&endpoint, &config("https://api.example.com")).unwrap();
        assert_eq!(req.url, "https://api.example.com/tracks/AC%23DC%3Flive%20now?term=x");

        let url = Url::parse(&req.url).unwrap();
        assert_eq!(url.path(), "/tracks/AC%23DC%3Flive%20now");
        assert_eq!(url.fragment(), None);
        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(decoded, vec![("term".to_string(), "x".to_string())]);
    }

    #[test]
    fn trailing_slash_in_path_is_kept() {
        let endpoint = TestEndpoint {
            path: "users/".to_string(),
            ..Default::default()
        };
        let req = build(&endpoint, &config("https://api.example.com/v1/")).unwrap();
        assert_eq!(req.url, "https://api.example.com/v1/users/");
    }

    #[test]
    fn empty_query_has_no_question_mark() {
        let endpoint = TestEndpoint {
            path: "search".to_string(),
            ..Default::default()
        };
        let req = build(&endpoint, &config("https://itunes.apple.com")).unwrap();
        assert_eq!(req.url, "https://itunes.apple.com/search");
        assert!(!req.url.contains('?'));
    }

    #[test]
    fn reserved_characters_round_trip() {
        let query = vec![
            ("term".to_string(), "Green Day & U2".to_string()),
            ("artist".to_string(), "Björk".to_string()),
            ("space test".to_string(), "value with spaces".to_string()),
            ("math".to_string(), "a=b+c?d#e/f%g".to_string()),
        ];
        let endpoint = TestEndpoint {
            path: "search".to_string(),
            query: query.clone(),
            ..Default::default()
        };
        let req = build(&endpoint, &config("https://itunes.apple.com")).unwrap();
        let url = Url::parse(&req.url).unwrap();
        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(decoded, query);
    }

    #[test]
    fn empty_base_url_is_invalid_request() {
        for base in ["", "   "] {
            let err = build(&TestEndpoint::search(), &config(base)).unwrap_err();
            assert!(matches!(err, NetworkError::InvalidRequest { .. }), "{base:?}");
        }
    }

    #[test]
    fn malformed_base_url_is_invalid_request() {
        for base in [
            "not a url",
            "itunes.apple.com",
            "ftp://itunes.apple.com",
            "mailto:someone@example.com",
            "https://itunes.apple.com?x=1",
        ] {
            let err = build(&TestEndpoint::search(), &config(base)).unwrap_err();
            assert!(matches!(err, NetworkError::InvalidRequest { .. }), "{base}");
        }
    }

    #[test]
    fn endpoint_headers_win_over_defaults() {
        let cfg = config("https://itunes.apple.com")
            .with_default_header("Accept", "application/json")
            .with_default_header("User-Agent", "catalog/0.1");
        let endpoint = TestEndpoint {
            path: "search".to_string(),
            headers: vec![("accept".to_string(), "text/plain".to_string())],
            ..Default::default()
        };
        let req = build(&endpoint, &cfg).unwrap();
        assert_eq!(req.header("Accept"), Some("text/plain"));
        assert_eq!(req.header("User-Agent"), Some("catalog/0.1"));
        assert_eq!(req.headers.len(), 2);
    }

    #[test]
    fn no_headers_means_empty_header_list() {
        let endpoint = TestEndpoint {
            path: "search".to_string(),
            ..Default::default()
        };
        let req = build(&endpoint, &config("https://itunes.apple.com")).unwrap();
        assert!(req.headers.is_empty());
    }

    #[test]
    fn header_with_line_break_is_rejected() {
        let endpoint = TestEndpoint {
            path: "search".to_string(),
            headers: vec![("X-Evil".to_string(), "a\r\nInjected: 1".to_string())],
            ..Default::default()
        };
        let err = build(&endpoint, &config("https://itunes.apple.com")).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidRequest { .. }));
    }

    #[test]
    fn body_is_attached_unchanged_with_default_content_type() {
        let body = br#"{"term": "test", "limit": 10}"#.to_vec();
        let endpoint = TestEndpoint {
            path: "search".to_string(),
            method: Some(HttpMethod::Post),
            body: Some(body.clone()),
            ..Default::default()
        };
        let req = build(&endpoint, &config("https://itunes.apple.com")).unwrap();
        assert_eq!(req.body, Some(body));
        assert_eq!(req.header("Content-Type"), Some(DEFAULT_CONTENT_TYPE));
    }

    #[test]
    fn explicit_content_type_is_kept() {
        let endpoint = TestEndpoint {
            path: "search".to_string(),
            method: Some(HttpMethod::Post),
            headers: vec![("content-type".to_string(), "application/xml".to_string())],
            body: Some(b"<xml>test</xml>".to_vec()),
            ..Default::default()
        };
        let req = build(&endpoint, &config("https://itunes.apple.com")).unwrap();
        assert_eq!(req.header("Content-Type"), Some("application/xml"));
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn method_is_passed_through() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Head,
        ] {
            let endpoint = TestEndpoint {
                path: "search".to_string(),
                method: Some(method),
                ..Default::default()
            };
            let req = build(&endpoint, &config("https://itunes.apple.com")).unwrap();
            assert_eq!(req.method, method);
        }
    }

    #[test]
    fn build_is_deterministic() {
        let cfg = Arc::new(
            config("https://itunes.apple.com").with_default_header("Accept", "application/json"),
        );
        let builder = RequestBuilder::new(cfg);
        let endpoint = TestEndpoint {
            method: Some(HttpMethod::Put),
            body: Some(b"payload".to_vec()),
            ..TestEndpoint::search()
        };
        assert_eq!(builder.build(&endpoint).unwrap(), builder.build(&endpoint).unwrap());
    }
}
