//! Ordered header list that keeps repeated names.

/// Header list preserving insertion order and duplicate names.
///
/// Lookups are case-insensitive; iteration yields names exactly as inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a header, keeping any existing values with the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Replace every value of `name` with a single value.
    ///
    /// The new entry takes the position of the first removed one, or goes last.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let position = self.position(&name);
        self.remove(&name);
        let entry = (name, value.into());
        match position {
            Some(index) => self.0.insert(index, entry),
            None => self.0.push(entry),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.0.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.0
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn h(pairs: &[(&str, &str)]) -> Headers {
        pairs.iter().copied().collect()
    }

    #[rstest]
    #[case(&[("Content-Type", "text/plain")], "content-type", Some("text/plain"))]
    #[case(&[("X-A", "1"), ("x-a", "2")], "X-A", Some("1"))]
    #[case(&[("Accept", "*/*")], "Content-Type", None)]
    #[case(&[], "Accept", None)]
    fn test_headers_get(
        #[case] pairs: &[(&str, &str)],
        #[case] name: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(h(pairs).get(name), expected);
    }

    #[rstest]
    fn test_headers_keep_repeated_names_in_order() {
        let mut headers = Headers::new();
        headers.append("Set-Cookie", "a=1");
        headers.append("Content-Type", "text/plain");
        headers.append("set-cookie", "b=2");

        let cookies: Vec<&str> = headers.get_all("Set-Cookie").collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
        assert_eq!(headers.len(), 3);
    }

    #[rstest]
    fn test_headers_insert_replaces_in_place() {
        let mut headers = h(&[("A", "1"), ("B", "2"), ("a", "3"), ("C", "4")]);
        headers.insert("A", "9");

        let pairs: Vec<(&str, &str)> = headers.iter().collect();
        assert_eq!(pairs, vec![("A", "9"), ("B", "2"), ("C", "4")]);
    }
}
