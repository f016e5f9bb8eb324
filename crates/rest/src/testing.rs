//! In-memory transport double shared by the builder tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use reqwest::header::HeaderMap;

use sforce_client::{ApiRequest, Response, Result, Transport};

/// Transport stub replying with a canned status and body.
///
/// Counts invocations and records the last rendered request so tests can
/// assert both that validation failures never reach the transport and that
/// builders render the wire shape they promise.
pub(crate) struct StubTransport {
    status: u16,
    body: String,
    calls: AtomicUsize,
    last_request: Mutex<Option<ApiRequest>>,
}

impl StubTransport {
    pub(crate) fn replying(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of times `perform` has been invoked.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request handed to the transport.
    pub(crate) fn last_request(&self) -> Option<ApiRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    async fn perform(&self, request: ApiRequest) -> Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        Ok(Response::new(
            self.status,
            HeaderMap::new(),
            Bytes::from(self.body.clone()),
        ))
    }
}
