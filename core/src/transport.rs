//! `HttpClient` backed by a ureq agent.
//!
//! # Design
//! ureq is blocking, so each call runs on tokio's blocking pool and the
//! calling task only awaits the join handle. The agent is configured with
//! `http_status_as_error(false)` so 4xx/5xx come back as data and are
//! classified by `ensure_success`, not by ureq. The timeout is enforced twice:
//! ureq's global timeout stops the worker thread, and `tokio::time::timeout`
//! guarantees the awaiting task resolves even if the worker is slow to notice.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use ureq::Agent;

use crate::config::NetworkConfiguration;
use crate::error::{NetworkError, NetworkResult, TransportFailure};
use crate::http::{ensure_success, HttpClient, HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: Agent,
    timeout: Duration,
}

impl UreqClient {
    /// Create a client whose timeout is taken from `config`.
    pub fn new(config: &NetworkConfiguration) -> Self {
        Self::with_timeout(config.timeout())
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl HttpClient for UreqClient {
    async fn execute(&self, request: HttpRequest) -> NetworkResult<HttpResponse> {
        let agent = self.agent.clone();
        let method = request.method;
        let url = request.url.clone();
        let handle = tokio::task::spawn_blocking(move || run_blocking(&agent, request));

        let response = match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(result)) => result?,
            Ok(Err(join_err)) if join_err.is_cancelled() => return Err(NetworkError::cancelled()),
            Ok(Err(join_err)) => {
                return Err(NetworkError::transport(
                    TransportFailure::Connectivity,
                    format!("transport worker failed: {join_err}"),
                ))
            }
            Err(_) => {
                warn!(%method, %url, timeout = ?self.timeout, "request timed out");
                return Err(NetworkError::transport(
                    TransportFailure::Timeout,
                    format!("no response within {:?}", self.timeout),
                )
                .with_cause("deadline"));
            }
        };

        debug!(
            %method,
            %url,
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );
        ensure_success(response)
    }
}

fn run_blocking(agent: &Agent, request: HttpRequest) -> NetworkResult<HttpResponse> {
    let mut builder = ureq::http::Request::builder()
        .method(request.method.as_str())
        .uri(request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    // ureq refuses bodies on methods without body semantics.
    let result = match request.body {
        Some(body) if request.method.has_body() => {
            let http_request = builder.body(body).map_err(invalid_request)?;
            agent.run(http_request)
        }
        _ => {
            let http_request = builder.body(()).map_err(invalid_request)?;
            agent.run(http_request)
        }
    };

    let mut response = result.map_err(map_ureq_error)?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_vec()
        .map_err(map_ureq_error)?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn invalid_request(err: ureq::http::Error) -> NetworkError {
    NetworkError::invalid_request(format!("request rejected by transport: {err}"))
}

fn map_ureq_error(err: ureq::Error) -> NetworkError {
    let kind = match err {
        ureq::Error::BadUri(_) => return NetworkError::invalid_request(err.to_string()),
        ureq::Error::Timeout(_) => TransportFailure::Timeout,
        _ => TransportFailure::Connectivity,
    };
    NetworkError::transport(kind, err.to_string()).with_cause(cause_label(&err))
}

fn cause_label(err: &ureq::Error) -> &'static str {
    match err {
        ureq::Error::Timeout(_) => "timeout",
        ureq::Error::HostNotFound => "host_not_found",
        ureq::Error::ConnectionFailed => "connection_failed",
        ureq::Error::Io(_) => "io",
        ureq::Error::TooManyRedirects => "too_many_redirects",
        _ => "other",
    }
}
