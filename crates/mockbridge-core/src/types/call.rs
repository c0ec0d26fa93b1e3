use crate::matching::normalize_url;
use crate::types::body::Body;
use crate::types::headers::Headers;
use crate::types::method::HttpMethod;

/// One outbound call caught by a mocking surface.
///
/// Call-scoped: a surface builds it, hands it by value to exactly one
/// callback, and the bridge consumes it.
#[derive(Debug)]
pub struct InterceptedCall {
    pub method: HttpMethod,
    /// Absolute URL including any query string
    pub url: String,
    pub headers: Headers,
    pub body: Body,
}

impl InterceptedCall {
    /// Build a call with no headers and no body.
    ///
    /// An empty path (`http://host`) is normalised to `/`, the way HTTP
    /// clients put it on the wire.
    pub fn new(method: HttpMethod, url: impl AsRef<str>) -> Self {
        Self {
            method,
            url: normalize_url(url.as_ref()),
            headers: Headers::new(),
            body: Body::Empty,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }
}
