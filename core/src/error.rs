//! Error taxonomy shared by every stage of the request pipeline.
//!
//! # Design
//! `NetworkError` is the only error type that crosses component boundaries.
//! Transport-library errors (ureq, tokio, serde_json) are converted where they
//! occur, so callers match on four closed variants and never on a foreign type.
//! Exactly one error is produced per call: the first failing stage wins and
//! later stages never run.

use thiserror::Error;

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Why a transport call never produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    /// DNS, connect, TLS or I/O failure.
    Connectivity,
    /// The configured timeout elapsed before a response arrived.
    Timeout,
    /// The caller abandoned the call.
    Cancelled,
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransportFailure::Connectivity => "connectivity",
            TransportFailure::Timeout => "timeout",
            TransportFailure::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Pipeline stage at which a call failed.
///
/// Ordering follows precedence: a request that is invalid is reported as such
/// even if the server would also have rejected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FailureStage {
    Decoding,
    InvalidResponse,
    Transport,
    InvalidRequest,
}

/// Errors returned by the request pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// The endpoint or configuration was rejected before anything was sent.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// The transport call did not complete. `cause` is a short stable label
    /// for the underlying failure (`connection_failed`, `host_not_found`,
    /// `deadline`, ...) when the adapter knows it.
    #[error("transport failure ({kind}): {message}")]
    Transport {
        kind: TransportFailure,
        cause: Option<String>,
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("invalid response: HTTP {status}")]
    InvalidResponse { status: u16, body: Option<Vec<u8>> },

    /// The status was 2xx but the body did not match the expected shape.
    #[error("decoding failed{}: {message}", field_suffix(.field))]
    Decoding {
        field: Option<String>,
        message: String,
    },
}

fn field_suffix(field: &Option<String>) -> String {
    field
        .as_deref()
        .map(|f| format!(" at `{f}`"))
        .unwrap_or_default()
}

impl NetworkError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        NetworkError::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn transport(kind: TransportFailure, message: impl Into<String>) -> Self {
        NetworkError::Transport {
            kind,
            cause: None,
            message: message.into(),
        }
    }

    /// Attach a cause label to a `Transport` error. Other variants are
    /// returned unchanged.
    pub fn with_cause(mut self, label: impl Into<String>) -> Self {
        if let NetworkError::Transport { cause, .. } = &mut self {
            *cause = Some(label.into());
        }
        self
    }

    pub fn cancelled() -> Self {
        Self::transport(TransportFailure::Cancelled, "request was cancelled")
    }

    /// Build an `InvalidResponse`, dropping an empty body.
    pub fn invalid_response(status: u16, body: Vec<u8>) -> Self {
        NetworkError::InvalidResponse {
            status,
            body: (!body.is_empty()).then_some(body),
        }
    }

    pub fn stage(&self) -> FailureStage {
        match self {
            NetworkError::InvalidRequest { .. } => FailureStage::InvalidRequest,
            NetworkError::Transport { .. } => FailureStage::Transport,
            NetworkError::InvalidResponse { .. } => FailureStage::InvalidResponse,
            NetworkError::Decoding { .. } => FailureStage::Decoding,
        }
    }

    /// Status code of an `InvalidResponse`, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetworkError::InvalidResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of an `InvalidResponse`, lossily decoded as UTF-8.
    pub fn body_text(&self) -> Option<String> {
        match self {
            NetworkError::InvalidResponse {
                body: Some(body), ..
            } => Some(String::from_utf8_lossy(body).into_owned()),
            _ => None,
        }
    }

    /// Cause label of a `Transport` error, if the adapter recorded one.
    pub fn transport_cause(&self) -> Option<&str> {
        match self {
            NetworkError::Transport { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }

    /// Offending field path of a `Decoding` error.
    pub fn field(&self) -> Option<&str> {
        match self {
            NetworkError::Decoding { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            NetworkError::Transport {
                kind: TransportFailure::Timeout,
                ..
            }
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            NetworkError::Transport {
                kind: TransportFailure::Cancelled,
                ..
            }
        )
    }
}
