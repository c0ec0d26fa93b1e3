//! Translation of path templates into full-URL regexes.

use crate::error::PatternError;
use crate::matching::converter::{builtin_converter_regex, ConverterIssue};
use crate::matching::template::{parse_template, ConverterSpec, Segment};
use crate::matching::url::BaseUrl;
use regex::Regex;

/// Trailing part of every full-URL pattern: optional query, optional fragment.
const URL_TAIL: &str = r"(?:\?[^#]*)?(?:#.*)?$";

/// Regex derived from one path template, anchored to a base URL.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub source_template: String,
    pub regex: Regex,
    /// Placeholder names in declaration order
    pub parameter_names: Vec<String>,
}

impl CompiledPattern {
    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// Raw captured parameter values, in declaration order.
    ///
    /// Only for introspection: dispatch re-derives parameters from the
    /// intercepted URL itself.
    pub fn captures(&self, url: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(url)?;
        Some(
            (1..=self.parameter_names.len())
                .filter_map(|i| caps.get(i).map(|m| m.as_str().to_owned()))
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Path-only regex body for `template` and its parameter names.
///
/// Every placeholder becomes exactly one capture group; `converter` supplies
/// the fragment inside it. Literal text is escaped verbatim.
pub fn path_regex<F>(template: &str, mut converter: F) -> Result<(String, Vec<String>), PatternError>
where
    F: FnMut(&ConverterSpec) -> Result<String, ConverterIssue>,
{
    let mut regex_str = String::new();
    let mut names = Vec::new();

    for segment in parse_template(template)? {
        match segment {
            Segment::Literal(text) => regex_str.push_str(&regex::escape(&text)),
            Segment::Param { name, converter: spec } => {
                let fragment = converter(&spec).map_err(|issue| match issue {
                    ConverterIssue::Unknown => PatternError::UnsupportedConverter {
                        template: template.to_owned(),
                        converter: spec.name.clone(),
                    },
                    ConverterIssue::InvalidArgs(detail) => PatternError::InvalidConverterArgs {
                        template: template.to_owned(),
                        converter: spec.name.clone(),
                        detail,
                    },
                })?;
                regex_str.push('(');
                regex_str.push_str(&fragment);
                regex_str.push(')');
                names.push(name);
            }
        }
    }

    Ok((regex_str, names))
}

/// Compile `template` into a regex matching full URLs under `base`.
///
/// Only built-in converters are accepted; the path portion is anchored at
/// both ends and any query string is ignored. Under a path prefix the root
/// template also matches the bare prefix.
pub fn compile_pattern(template: &str, base: &BaseUrl) -> Result<CompiledPattern, PatternError> {
    let (mut path, parameter_names) = path_regex(template, builtin_converter_regex)?;
    if path == "/" && !base.prefix().is_empty() {
        path.push('?');
    }
    let pattern = format!(
        "^(?i:{}){}{}{}",
        regex::escape(&base.origin()),
        regex::escape(base.prefix()),
        path,
        URL_TAIL
    );

    Ok(CompiledPattern {
        source_template: template.to_owned(),
        regex: Regex::new(&pattern)?,
        parameter_names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn base(url: &str) -> BaseUrl {
        BaseUrl::parse(url).expect("Should parse base URL")
    }

    fn compile(template: &str) -> CompiledPattern {
        compile_pattern(template, &base("http://www.example.com")).expect("Should compile")
    }

    #[rstest]
    #[case("/", "http://www.example.com/", true)]
    #[case("/", "http://www.example.com/?frasier=crane", true)]
    #[case("/", "http://www.example.com/other", false)]
    #[case("/", "http://other.example.com/", false)]
    #[case("/items/<int:item_id>", "http://www.example.com/items/42", true)]
    #[case("/items/<int:item_id>", "http://www.example.com/items/-7", true)]
    #[case("/items/<int:item_id>", "http://www.example.com/items/abc", false)]
    #[case("/items/<int:item_id>", "http://www.example.com/items/42/extra", false)]
    #[case("/<float:v>", "http://www.example.com/4.0", true)]
    #[case("/<float:v>", "http://www.example.com/4", false)]
    #[case("/<string:v>", "http://www.example.com/foo/bar", false)]
    #[case("/<v>", "http://www.example.com/Frasier?x=1", true)]
    #[case("/<path:v>", "http://www.example.com/foo/bar", true)]
    #[case("/<path:v>", "http://www.example.com/foo/bar?x=1", true)]
    #[case("/<uuid:v>", "http://www.example.com/e6c8ea5a-3c0b-4a45-9d6b-2a9a1c1f2f3e", true)]
    #[case("/<uuid:v>", "http://www.example.com/e6c8ea5a", false)]
    #[case("/api/users.json", "http://www.example.com/api/usersXjson", false)]
    #[case("/<any(a, b):v>", "http://www.example.com/b", true)]
    #[case("/<any(a, b):v>", "http://www.example.com/c", false)]
    #[case("/", "HTTP://WWW.EXAMPLE.COM/", true)]
    fn test_compiled_pattern_matches(
        #[case] template: &str,
        #[case] url: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(compile(template).is_match(url), expected, "{template} vs {url}");
    }

    #[rstest]
    fn test_compiled_pattern_with_prefix() {
        let pattern = compile_pattern("/items/<int:id>", &base("https://api.example.com/v1/"))
            .expect("Should compile");
        assert!(pattern.is_match("https://api.example.com/v1/items/1"));
        assert!(!pattern.is_match("https://api.example.com/items/1"));
        assert!(!pattern.is_match("http://api.example.com/v1/items/1"));
    }

    #[rstest]
    #[case("http://h/api", true)]
    #[case("http://h/api/", true)]
    #[case("http://h/api?x=1", true)]
    #[case("http://h/apix", false)]
    #[case("http://h/api//", false)]
    fn test_root_template_matches_bare_prefix(#[case] url: &str, #[case] expected: bool) {
        let pattern = compile_pattern("/", &base("http://h/api")).expect("Should compile");
        assert_eq!(pattern.is_match(url), expected, "{url}");
    }

    #[rstest]
    #[case("/<a>/<int:b>/<path:c>", "http://www.example.com/x/3/y/z", &["x", "3", "y/z"])]
    #[case("/<int:a>-<int:b>", "http://www.example.com/1-2?q=3", &["1", "2"])]
    #[case("/<string:a>.json", "http://www.example.com/name.json", &["name"])]
    fn test_captures_recover_parameters(
        #[case] template: &str,
        #[case] url: &str,
        #[case] expected: &[&str],
    ) {
        let pattern = compile(template);
        let captures = pattern.captures(url).expect("Should match");
        assert_eq!(captures, expected);
        assert_eq!(pattern.parameter_names.len(), expected.len());
    }

    #[rstest]
    #[case("/<int:a>/<b>", &["a", "b"])]
    #[case("/static", &[])]
    fn test_parameter_names_in_declaration_order(
        #[case] template: &str,
        #[case] expected: &[&str],
    ) {
        assert_eq!(compile(template).parameter_names, expected);
    }

    #[rstest]
    fn test_round_trip_for_substituted_values() {
        let cases: &[(&str, &[&[&str]])] = &[
            ("/items/<int:item_id>", &[&["0"], &["42"], &["-3"]]),
            ("/<float:v>", &[&["4.0"], &["-0.25"]]),
            ("/<a>/<string:b>", &[&["x", "y"], &["hello world", "%20"]]),
            ("/files/<path:p>", &[&["a"], &["a/b/c.txt"]]),
            ("/<uuid:id>", &[&["E6C8EA5A-3C0B-4A45-9D6B-2A9A1C1F2F3E"]]),
            ("/<any(red, blue):c>/<int(fixed_digits=2):n>", &[&["red", "07"], &["blue", "10"]]),
        ];

        for (template, value_sets) in cases {
            let pattern = compile(template);
            for values in *value_sets {
                let mut path = String::new();
                let mut values_iter = values.iter();
                for segment in parse_template(template).expect("Should parse") {
                    match segment {
                        Segment::Literal(text) => path.push_str(&text),
                        Segment::Param { .. } => path.push_str(values_iter.next().expect("value")),
                    }
                }
                let url = format!("http://www.example.com{path}");
                let captures = pattern
                    .captures(&url)
                    .unwrap_or_else(|| panic!("{url} should match {template}"));
                assert_eq!(captures, *values, "{template}");
            }
        }
    }

    #[rstest]
    #[case("/<hex:id>", "hex")]
    #[case("/a/<int:x>/<regex:y>", "regex")]
    fn test_unknown_converter_is_rejected(#[case] template: &str, #[case] converter: &str) {
        let err = compile_pattern(template, &base("http://h")).expect_err("Should fail");
        assert!(matches!(
            err,
            PatternError::UnsupportedConverter { converter: ref c, .. } if c == converter
        ));
    }
}
