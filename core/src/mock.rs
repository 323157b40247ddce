//! Deterministic `HttpClient` double.
//!
//! Replays canned responses or errors in FIFO order, falling back to a fixed
//! result once the queue is drained, and records every request it receives.
//! No I/O is performed.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{NetworkError, NetworkResult};
use crate::http::{ensure_success, HttpClient, HttpRequest, HttpResponse};

#[derive(Debug)]
pub struct MockHttpClient {
    queued: Mutex<VecDeque<NetworkResult<HttpResponse>>>,
    fallback: NetworkResult<HttpResponse>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpClient {
    /// Always answer with `response`.
    pub fn returning(response: HttpResponse) -> Self {
        Self::with_fallback(Ok(response))
    }

    /// Answer with `status` and a JSON body.
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        let mut response = HttpResponse::new(status, body.into().into_bytes());
        response
            .headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        Self::returning(response)
    }

    /// Always fail with `error`.
    pub fn failing(error: NetworkError) -> Self {
        Self::with_fallback(Err(error))
    }

    fn with_fallback(fallback: NetworkResult<HttpResponse>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a one-shot result served before the fallback.
    pub fn enqueue(&self, result: NetworkResult<HttpResponse>) {
        lock(&self.queued).push_back(result);
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: HttpRequest) -> NetworkResult<HttpResponse> {
        lock(&self.requests).push(request);
        let next = lock(&self.queued)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        ensure_success(next?)
    }
}

// A poisoned lock only means another test thread panicked mid-push; the data
// is still usable.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
