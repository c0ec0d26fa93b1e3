//! Response shapes: what the application produces and what surfaces receive.

use crate::types::body::Body;
use crate::types::headers::Headers;

pub const TEXT_HTML: &str = "text/html; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json";

/// Response produced by the application for one intercepted call.
#[derive(Debug)]
pub struct SyntheticResponse {
    /// Status code, not restricted to registered codes
    pub status: u16,
    pub headers: Headers,
    pub body: Body,
}

impl SyntheticResponse {
    pub fn new(status: u16, body: impl Into<Body>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body.into(),
        }
    }

    /// `200` response with an HTML content type.
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(200, body.into()).with_header("Content-Type", TEXT_HTML)
    }

    /// `200` response with a JSON-encoded body.
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(200, value.to_string()).with_header("Content-Type", APPLICATION_JSON)
    }

    /// Response whose body is produced chunk by chunk.
    pub fn chunked<I>(status: u16, chunks: I) -> Self
    where
        I: IntoIterator<Item = Result<Vec<u8>, crate::app::AppError>>,
        I::IntoIter: Send + 'static,
    {
        Self::new(status, Body::chunked(chunks))
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Append a `Set-Cookie` header scoped to the whole site.
    pub fn set_cookie(mut self, key: &str, value: &str) -> Self {
        self.headers
            .append("Set-Cookie", format!("{key}={value}; Path=/"));
        self
    }

    /// Buffer the body, producing the tuple shape surfaces return.
    pub fn into_reply(self) -> Result<Reply, crate::app::AppError> {
        Ok(Reply {
            status: self.status,
            headers: self.headers,
            body: self.body.drain()?,
        })
    }
}

/// Fully buffered `(status, headers, body)` result of a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Mutable response context handed to adapter-style callbacks.
///
/// The callback sets status and headers here and returns only the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseContext {
    pub status_code: u16,
    pub headers: Headers,
}

impl Default for ResponseContext {
    fn default() -> Self {
        Self {
            status_code: 200,
            headers: Headers::new(),
        }
    }
}
