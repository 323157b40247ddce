//! End-to-end request pipeline: build, execute, decode.
//!
//! # Design
//! `ApiClient` holds the shared configuration and an `HttpClient`; it carries
//! no mutable state, so one instance (or its clones) can serve any number of
//! concurrent calls. Each stage short-circuits on failure, which gives the
//! precedence invalid request > transport > invalid response > decoding.
//! The configured timeout bounds every call whatever the transport was set
//! up with. Nothing is retried.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{instrument, warn};

use crate::builder::RequestBuilder;
use crate::config::NetworkConfiguration;
use crate::decode::decode;
use crate::endpoint::Endpoint;
use crate::error::{NetworkError, NetworkResult, TransportFailure};
use crate::http::{ensure_success, HttpClient, HttpResponse};

#[derive(Debug)]
pub struct ApiClient<C> {
    builder: RequestBuilder,
    http: Arc<C>,
}

impl<C> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            builder: self.builder.clone(),
            http: Arc::clone(&self.http),
        }
    }
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(config: NetworkConfiguration, http: C) -> Self {
        Self::with_shared(Arc::new(config), Arc::new(http))
    }

    pub fn with_shared(config: Arc<NetworkConfiguration>, http: Arc<C>) -> Self {
        Self {
            builder: RequestBuilder::new(config),
            http,
        }
    }

    pub fn configuration(&self) -> &NetworkConfiguration {
        self.builder.configuration()
    }

    pub fn http_client(&self) -> &C {
        &self.http
    }

    /// Build, execute and decode `endpoint`.
    #[instrument(skip_all, fields(path = %endpoint.path(), method = %endpoint.method()))]
    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> NetworkResult<E::Response> {
        let response = self.fetch(endpoint).await?;
        decode(&response)
    }

    /// Like [`send`](Self::send), but resolves to a cancellation error as soon
    /// as `token` fires. The in-flight transport call is abandoned.
    #[instrument(skip_all, fields(path = %endpoint.path(), method = %endpoint.method()))]
    pub async fn send_cancellable<E: Endpoint>(
        &self,
        endpoint: &E,
        token: &CancellationToken,
    ) -> NetworkResult<E::Response> {
        let response = tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!("request cancelled by caller");
                return Err(NetworkError::cancelled());
            }
            result = self.fetch(endpoint) => result?,
        };
        decode(&response)
    }

    /// Build and execute `endpoint` without decoding the body.
    pub async fn fetch<E: Endpoint + ?Sized>(&self, endpoint: &E) -> NetworkResult<HttpResponse> {
        let request = self.builder.build(endpoint)?;
        let timeout = self.configuration().timeout();
        let response = match tokio::time::timeout(timeout, self.http.execute(request)).await {
            Ok(result) => result.inspect_err(|err| {
                warn!(error = %err, "request failed");
            })?,
            Err(_) => {
                warn!(?timeout, "request exceeded configured timeout");
                return Err(NetworkError::transport(
                    TransportFailure::Timeout,
                    format!("no response within {timeout:?}"),
                )
                .with_cause("deadline"));
            }
        };
        // Adapters already classify status; re-checking keeps the pipeline
        // correct for any implementation that does not.
        ensure_success(response)
    }
}
