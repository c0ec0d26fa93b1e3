//! URL splitting, normalisation and the base URL patterns are anchored to.

use crate::error::RegistrationError;
use std::fmt;
use std::str::FromStr;

/// Pieces of an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// `scheme://authority`
    pub origin: &'a str,
    /// Path, always starting with `/`
    pub path: &'a str,
    /// Query string without the `?`
    pub query: Option<&'a str>,
}

/// Split an absolute URL into origin, path and query.
///
/// Fragments are dropped. Returns `None` for URLs without `scheme://`.
pub fn split_url(url: &str) -> Option<UrlParts<'_>> {
    let scheme_end = url.find("://")?;
    if scheme_end == 0 {
        return None;
    }
    let url = url.split('#').next().unwrap_or(url);
    let authority_start = scheme_end + 3;
    let path_start = url[authority_start..]
        .find(['/', '?'])
        .map_or(url.len(), |i| authority_start + i);

    let origin = &url[..path_start];
    let rest = &url[path_start..];
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    let path = if path.is_empty() { "/" } else { path };

    Some(UrlParts {
        origin,
        path,
        query,
    })
}

/// Give URLs with an empty path the `/` path HTTP clients send.
pub fn normalize_url(url: &str) -> String {
    match split_url(url) {
        Some(parts) if !url[parts.origin.len()..].starts_with('/') => {
            format!("{}/{}", parts.origin, &url[parts.origin.len()..])
        }
        _ => url.to_owned(),
    }
}

/// Scheme, host and optional path prefix the application is mounted at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    scheme: String,
    authority: String,
    prefix: String,
}

impl BaseUrl {
    pub fn parse(raw: &str) -> Result<Self, RegistrationError> {
        let invalid = |detail: &str| RegistrationError::InvalidBaseUrl {
            url: raw.to_owned(),
            detail: detail.to_owned(),
        };

        if raw.contains(['?', '#']) {
            return Err(invalid("base URL must not carry a query or fragment"));
        }
        let parts = split_url(raw).ok_or_else(|| invalid("expected `scheme://host`"))?;
        let (scheme, authority) = parts
            .origin
            .split_once("://")
            .ok_or_else(|| invalid("expected `scheme://host`"))?;
        if authority.is_empty() {
            return Err(invalid("missing host"));
        }
        if !scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(invalid("invalid scheme"));
        }

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            authority: authority.to_ascii_lowercase(),
            prefix: parts.path.trim_end_matches('/').to_owned(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// `scheme://authority`, lower-cased
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }

    /// Mount prefix without trailing slash; empty when mounted at the root.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Path of `url` as the mounted application sees it, plus its query.
    ///
    /// Returns `None` if `url` lies outside this base.
    pub fn app_path<'a>(&self, url: &'a str) -> Option<(&'a str, Option<&'a str>)> {
        let parts = split_url(url)?;
        if !parts.origin.eq_ignore_ascii_case(&self.origin()) {
            return None;
        }
        let path = match parts.path.strip_prefix(self.prefix.as_str()) {
            Some("") => "/",
            Some(path) if path.starts_with('/') => path,
            _ => return None,
        };
        Some((path, parts.query))
    }
}

impl FromStr for BaseUrl {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseUrl::parse(s)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin(), self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://www.example.com", "http://www.example.com", "/", None)]
    #[case("http://www.example.com/", "http://www.example.com", "/", None)]
    #[case("http://www.example.com?a=1", "http://www.example.com", "/", Some("a=1"))]
    #[case("https://h:8080/a/b?x=1&y=2", "https://h:8080", "/a/b", Some("x=1&y=2"))]
    #[case("http://h/a#frag", "http://h", "/a", None)]
    fn test_split_url(
        #[case] url: &str,
        #[case] origin: &str,
        #[case] path: &str,
        #[case] query: Option<&str>,
    ) {
        let parts = split_url(url).expect("Should split");
        assert_eq!(parts.origin, origin);
        assert_eq!(parts.path, path);
        assert_eq!(parts.query, query);
    }

    #[rstest]
    #[case("/relative")]
    #[case("www.example.com")]
    #[case("://host")]
    fn test_split_url_rejects_relative(#[case] url: &str) {
        assert!(split_url(url).is_none());
    }

    #[rstest]
    #[case("http://www.example.com", "http://www.example.com/")]
    #[case("http://www.example.com?q=1", "http://www.example.com/?q=1")]
    #[case("http://www.example.com/a", "http://www.example.com/a")]
    #[case("not a url", "not a url")]
    fn test_normalize_url(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(normalize_url(url), expected);
    }

    #[rstest]
    #[case("http://www.example.com", "http://www.example.com", "")]
    #[case("HTTP://WWW.Example.com/", "http://www.example.com", "")]
    #[case("https://api.example.com/v1/", "https://api.example.com", "/v1")]
    fn test_base_url_parse(#[case] raw: &str, #[case] origin: &str, #[case] prefix: &str) {
        let base = BaseUrl::parse(raw).expect("Should parse");
        assert_eq!(base.origin(), origin);
        assert_eq!(base.prefix(), prefix);
    }

    #[rstest]
    #[case("www.example.com")]
    #[case("http://")]
    #[case("http://h/?q=1")]
    #[case("ht tp://h")]
    fn test_base_url_parse_invalid(#[case] raw: &str) {
        assert!(matches!(
            BaseUrl::parse(raw),
            Err(RegistrationError::InvalidBaseUrl { .. })
        ));
    }

    #[rstest]
    #[case("http://h", "http://h/items?x=1", Some(("/items", Some("x=1"))))]
    #[case("http://h/api", "http://h/api/items", Some(("/items", None)))]
    #[case("http://h/api", "http://h/api", Some(("/", None)))]
    #[case("http://h/api", "http://h/apix", None)]
    #[case("http://h", "http://other/items", None)]
    #[case("http://h", "https://h/items", None)]
    fn test_base_url_app_path(
        #[case] base: &str,
        #[case] url: &str,
        #[case] expected: Option<(&str, Option<&str>)>,
    ) {
        let base = BaseUrl::parse(base).expect("Should parse");
        assert_eq!(base.app_path(url), expected);
    }
}
