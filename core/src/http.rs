//! HTTP transport types and the executor capability.
//!
//! # Design
//! Requests and responses are plain data. `RequestBuilder` produces an
//! `HttpRequest`; an `HttpClient` implementation performs the round-trip and
//! hands back an `HttpResponse`. Nothing else in the crate touches the network,
//! so swapping the real transport for `MockHttpClient` changes no other code.
//!
//! All fields use owned types so values can move freely between tasks.

use async_trait::async_trait;

use crate::error::{NetworkError, NetworkResult};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }

    /// Whether requests with this method conventionally carry a body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transport-ready request.
///
/// Fully determined by the endpoint and configuration it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A raw response as returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Executes built requests against a real or simulated transport.
///
/// Implementations must surface any non-2xx status as
/// [`NetworkError::InvalidResponse`] (see [`ensure_success`]) and report
/// connectivity, timeout and cancellation as [`NetworkError::Transport`]. They
/// never decode the body.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> NetworkResult<HttpResponse>;
}

#[async_trait]
impl<C: HttpClient + ?Sized> HttpClient for std::sync::Arc<C> {
    async fn execute(&self, request: HttpRequest) -> NetworkResult<HttpResponse> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<C: HttpClient + ?Sized> HttpClient for Box<C> {
    async fn execute(&self, request: HttpRequest) -> NetworkResult<HttpResponse> {
        (**self).execute(request).await
    }
}

/// Pass 2xx responses through; turn anything else into `InvalidResponse`.
pub fn ensure_success(response: HttpResponse) -> NetworkResult<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(NetworkError::invalid_response(response.status, response.body))
    }
}
