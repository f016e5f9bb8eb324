//! Protocol-level request descriptors produced by the builders.

use tokio_util::sync::CancellationToken;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
        }
    }
}

/// A fully-rendered API request, ready for [`Transport::perform`].
///
/// The path is rooted under the versioned REST prefix and already carries its
/// percent-encoded query string; the transport only prepends the instance URL
/// and version segment. A request is immutable once rendered: builders apply
/// all options to their config first and render exactly once.
///
/// [`Transport::perform`]: crate::Transport::perform
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: RequestMethod,
    pub path: String,
    /// Pre-serialized JSON body, if the operation sends one.
    pub body: Option<String>,
    /// Token the transport races against the round trip.
    pub cancellation: Option<CancellationToken>,
}

impl ApiRequest {
    /// Create a GET request for the given path.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: RequestMethod::Get,
            path: path.into(),
            body: None,
            cancellation: None,
        }
    }

    /// Create a POST request with a pre-serialized JSON body.
    pub fn post(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: RequestMethod::Post,
            path: path.into(),
            body: Some(body.into()),
            cancellation: None,
        }
    }

    /// Attach a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}
