//! Immutable network settings.
//!
//! # Design
//! Built once, then shared read-only (usually behind an `Arc`) by every
//! request. Nothing is read from the environment; callers pass the values in.
//! Validation of the base URL is deferred to `RequestBuilder::build`, which
//! reports it as an invalid request.

use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfiguration {
    base_url: String,
    default_headers: Vec<(String, String)>,
    timeout: Duration,
}

impl NetworkConfiguration {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Add a header sent with every request. A later call with the same name
    /// (compared case-insensitively) replaces the earlier value.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.default_headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.default_headers.push((name, value.into()));
        self
    }

    /// Set the per-request timeout. A zero duration is ignored.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    pub fn with_timeout_secs(self, secs: u64) -> Self {
        self.with_timeout(Duration::from_secs(secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn timeout_secs(&self) -> f64 {
        self.timeout.as_secs_f64()
    }
}

impl Default for NetworkConfiguration {
    fn default() -> Self {
        Self::new("")
    }
}
