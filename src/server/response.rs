use http::StatusCode;
use serde::Serialize;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{error, warn};

/// Maximum inline headers before heap allocation. Most responses carry far
/// fewer than sixteen.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage. Header names are `Arc<str>` because they
/// repeat across responses and clone in O(1); values are per-response data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Response under construction for one request.
///
/// The dispatch pipeline and middleware write into this; the embedding HTTP
/// listener serializes it to the wire afterwards. Once [`Response::end`] has
/// been called the body is sealed and further writes are dropped with a
/// warning; a middleware that ends the response and never invokes its
/// continuation short-circuits the chain.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderVec,
    body: Vec<u8>,
    ended: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Create an empty 200 response.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: HeaderVec::new(),
            body: Vec::new(),
            ended: false,
        }
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Canonical reason phrase for the current status code.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
    }

    /// Add or replace a header (name matching is case-insensitive).
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value.into()));
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderVec {
        &self.headers
    }

    /// Append bytes to the body. Writes after [`Response::end`] are dropped.
    pub fn write(&mut self, chunk: &[u8]) {
        if self.ended {
            warn!(
                status = self.status,
                dropped_bytes = chunk.len(),
                "write after end of response dropped"
            );
            return;
        }
        self.body.extend_from_slice(chunk);
    }

    /// Seal the response. Idempotent.
    pub fn end(&mut self) {
        self.ended = true;
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Serialize `body` as JSON, set the status and content type, and end the
    /// response. Serialization failures are answered with a 500 and logged
    /// rather than panicking the request thread.
    pub fn send_json<T: Serialize>(&mut self, status: u16, body: &T) {
        match serde_json::to_vec(body) {
            Ok(bytes) => {
                self.set_status(status);
                self.set_header("content-type", "application/json");
                self.write(&bytes);
                self.end();
            }
            Err(e) => {
                error!(error = %e, "failed to serialize response body");
                self.set_status(500);
                self.end();
            }
        }
    }

    /// Write a plain-text body, set the status, and end the response.
    pub fn send_text(&mut self, status: u16, body: &str) {
        self.set_status(status);
        self.set_header("content-type", "text/plain");
        self.write(body.as_bytes());
        self.end();
    }
}
