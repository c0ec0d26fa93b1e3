//! The application side of the bridge.
//!
//! [`Application`] is the boundary the bridge needs: an enumerable route table
//! and an in-process request execution entry point. [`App`] is a small
//! werkzeug-style router implementing it.

mod params;
mod router;

pub use params::PathParams;
pub use router::{App, Handler};

use crate::matching::parse_query_string;
use crate::types::headers::Headers;
use crate::types::method::HttpMethod;
use crate::types::response::SyntheticResponse;
use crate::types::route::UrlRule;

/// Error raised by an application while handling a request.
///
/// The bridge never wraps or converts it.
pub type AppError = Box<dyn std::error::Error + Send + Sync>;

/// An application the bridge can route intercepted calls into.
pub trait Application: Send + Sync {
    /// The route table, in registration order; `None` if there is none.
    fn url_map(&self) -> Option<Vec<UrlRule>>;

    /// Execute one request in-process.
    fn handle(&self, request: AppRequest) -> Result<SyntheticResponse, AppError>;
}

/// Request as seen by an [`Application`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRequest {
    pub method: HttpMethod,
    /// Path below the application's mount point, starting with `/`
    pub path: String,
    /// Raw query string without `?`
    pub query: Option<String>,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl AppRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Decoded query parameters, repeated keys kept.
    pub fn args(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(parse_query_string)
            .unwrap_or_default()
    }

    /// First value of query parameter `name`.
    pub fn arg(&self, name: &str) -> Option<String> {
        self.args()
            .into_iter()
            .find_map(|(k, v)| (k == name).then_some(v))
    }

    /// Cookies sent in `Cookie` headers, in the order given.
    pub fn cookies(&self) -> Vec<(String, String)> {
        self.headers
            .get_all("Cookie")
            .flat_map(|header| header.split(';'))
            .filter_map(|item| {
                let item = item.trim();
                if item.is_empty() {
                    return None;
                }
                let (key, value) = item.split_once('=').unwrap_or(("", item));
                Some((key.trim().to_owned(), value.trim().trim_matches('"').to_owned()))
            })
            .collect()
    }

    pub fn cookie(&self, name: &str) -> Option<String> {
        self.cookies()
            .into_iter()
            .find_map(|(k, v)| (k == name).then_some(v))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, &[])]
    #[case(Some("frasier=crane"), &[("frasier", "crane")])]
    #[case(Some("frasier=crane; frasier2=crane2"), &[("frasier", "crane"), ("frasier2", "crane2")])]
    #[case(Some("a=\"quoted\";;b=2;"), &[("a", "quoted"), ("b", "2")])]
    #[case(Some("bare"), &[("", "bare")])]
    fn test_request_cookies(#[case] cookie: Option<&str>, #[case] expected: &[(&str, &str)]) {
        let mut request = AppRequest::new(HttpMethod::Get, "/");
        if let Some(cookie) = cookie {
            request.headers.append("Cookie", cookie);
        }
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        assert_eq!(request.cookies(), expected);
    }

    #[rstest]
    fn test_request_args() {
        let mut request = AppRequest::new(HttpMethod::Get, "/");
        request.query = Some("frasier=crane&x=1&x=2".into());
        assert_eq!(request.arg("frasier").as_deref(), Some("crane"));
        assert_eq!(request.arg("x").as_deref(), Some("1"));
        assert_eq!(request.arg("missing"), None);
        assert_eq!(request.args().len(), 3);
    }

    #[rstest]
    fn test_request_json() {
        let mut request = AppRequest::new(HttpMethod::Post, "/");
        request.body = br#"{"hello": "world"}"#.to_vec();
        let value = request.json().expect("Should parse");
        assert_eq!(value["hello"], "world");
    }
}
