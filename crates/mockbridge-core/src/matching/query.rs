//! Query string decoding.

/// Parse a query string into ordered `(key, value)` pairs with URL decoding.
///
/// Repeated keys are kept as separate pairs. `+` decodes to a space.
pub fn parse_query_string(query_str: &str) -> Vec<(String, String)> {
    query_str
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|s| s.into_owned())
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", &[])]
    #[case("frasier=crane", &[("frasier", "crane")])]
    #[case("a=1&b=2", &[("a", "1"), ("b", "2")])]
    #[case("a=1&a=2", &[("a", "1"), ("a", "2")])]
    #[case("flag", &[("flag", "")])]
    #[case("q=hello%20world&x=a+b", &[("q", "hello world"), ("x", "a b")])]
    #[case("&&a=1&", &[("a", "1")])]
    #[case("k=v=w", &[("k", "v=w")])]
    fn test_parse_query_string(#[case] input: &str, #[case] expected: &[(&str, &str)]) {
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        assert_eq!(parse_query_string(input), expected);
    }
}
