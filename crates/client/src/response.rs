//! API response wrapper with a single-use body.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

/// Wrapper around an executed API response.
///
/// The body is a single-reader resource: decode paths move it out with
/// [`take_body`], after which it is gone. The diagnostic [`dump`] only
/// borrows, so peeking never costs a later consumer its read.
///
/// [`take_body`]: Response::take_body
/// [`dump`]: Response::dump
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Response {
    /// Create a new response from its parts.
    pub fn new(status: u16, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body: Some(body),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Render the status as `"<code> <reason phrase>"`.
    ///
    /// Codes without a canonical reason phrase render as the bare code.
    pub fn status_line(&self) -> String {
        match StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
        {
            Some(reason) => format!("{} {}", self.status, reason),
            None => self.status.to_string(),
        }
    }

    /// Returns true when the status indicates failure.
    ///
    /// Anything above 299 counts, including redirects: the client performs
    /// no automatic redirect handling.
    pub fn is_error(&self) -> bool {
        self.status > 299
    }

    /// Get the `Warning` header values, verbatim and in response order.
    pub fn warnings(&self) -> Vec<String> {
        self.headers
            .get_all("warning")
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Returns true when the response carries deprecation warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings().is_empty()
    }

    /// Move the body out of the response.
    ///
    /// Returns an empty buffer once the body has already been consumed.
    pub fn take_body(&mut self) -> Bytes {
        self.body.take().unwrap_or_default()
    }

    /// Render the response as a string for testing or debugging.
    ///
    /// Borrows the body, so the content stays available to a subsequent
    /// [`take_body`]. Invalid UTF-8 is replaced rather than reported; this
    /// method always produces a string.
    ///
    /// [`take_body`]: Response::take_body
    pub fn dump(&self) -> String {
        let mut out = format!("[{}]", self.status_line());
        if let Some(body) = &self.body {
            if !body.is_empty() {
                out.push(' ');
                out.push_str(&String::from_utf8_lossy(body));
            }
        }
        out
    }
}
