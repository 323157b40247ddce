//! Typed HTTP API client core, with a music-catalog integration.
//!
//! # Overview
//! Three capabilities are kept apart: an [`Endpoint`] says *what* to request,
//! [`RequestBuilder`] turns it into a transport-ready [`HttpRequest`] under a
//! [`NetworkConfiguration`], and an [`HttpClient`] says *how* to execute it.
//! [`ApiClient`] chains build → execute → decode and reports every failure as a
//! single [`NetworkError`].
//!
//! # Design
//! - Configuration is an immutable value passed in explicitly, never global.
//! - `RequestBuilder` and decoding are pure; only `HttpClient` implementations
//!   perform I/O. [`UreqClient`] is the real transport, [`MockHttpClient`] a
//!   deterministic double.
//! - No retries, caching or authentication: recovery is the caller's call.

pub mod builder;
pub mod catalog;
pub mod client;
pub mod config;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod mock;
pub mod transport;

pub use builder::RequestBuilder;
pub use client::ApiClient;
pub use config::NetworkConfiguration;
pub use decode::decode;
pub use endpoint::{json_body, Endpoint};
pub use error::{FailureStage, NetworkError, NetworkResult, TransportFailure};
pub use http::{ensure_success, HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use mock::MockHttpClient;
pub use tokio_util::sync::CancellationToken;
pub use transport::UreqClient;
