//! Built-in converter regexes.
//!
//! The set mirrors the converter registry of werkzeug-style routers:
//! `default`, `string`, `any`, `path`, `int`, `float` and `uuid`. Anything
//! else is reported as unknown instead of falling back to a generic match.

use crate::matching::template::{ConverterArg, ConverterSpec};

const SEGMENT: &str = "[^/?#]";
const UUID: &str =
    "[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}";

/// Why a converter could not be translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterIssue {
    Unknown,
    InvalidArgs(String),
}

/// Regex fragment (without capture group) for a built-in converter.
pub fn builtin_converter_regex(spec: &ConverterSpec) -> Result<String, ConverterIssue> {
    match spec.name.as_str() {
        "default" | "string" => string_regex(&spec.args),
        "int" => int_regex(&spec.args),
        "float" => {
            accept_keywords(&spec.args, &["min", "max", "signed"])?;
            Ok(r"-?\d+\.\d+".to_owned())
        }
        "path" => {
            accept_keywords(&spec.args, &[])?;
            Ok("[^?#]+".to_owned())
        }
        "uuid" => {
            accept_keywords(&spec.args, &[])?;
            Ok(UUID.to_owned())
        }
        "any" => any_regex(&spec.args),
        _ => Err(ConverterIssue::Unknown),
    }
}

fn string_regex(args: &[ConverterArg]) -> Result<String, ConverterIssue> {
    accept_keywords(args, &["length", "minlength", "maxlength"])?;
    let length = keyword_usize(args, "length")?;
    let min = keyword_usize(args, "minlength")?;
    let max = keyword_usize(args, "maxlength")?;

    Ok(match (length, min, max) {
        (Some(n), _, _) => format!("{SEGMENT}{{{n}}}"),
        (None, None, None) => format!("{SEGMENT}+"),
        (None, min, Some(max)) => {
            let min = min.unwrap_or(1);
            if min > max {
                return Err(ConverterIssue::InvalidArgs(format!(
                    "minlength {min} is greater than maxlength {max}"
                )));
            }
            format!("{SEGMENT}{{{min},{max}}}")
        }
        (None, Some(min), None) => format!("{SEGMENT}{{{},}}", min.max(1)),
    })
}

fn int_regex(args: &[ConverterArg]) -> Result<String, ConverterIssue> {
    accept_keywords(args, &["fixed_digits", "min", "max", "signed"])?;
    Ok(match keyword_usize(args, "fixed_digits")? {
        Some(0) => {
            return Err(ConverterIssue::InvalidArgs(
                "fixed_digits must be positive".into(),
            ))
        }
        Some(n) => format!(r"-?\d{{{n}}}"),
        None => r"-?\d+".to_owned(),
    })
}

fn any_regex(args: &[ConverterArg]) -> Result<String, ConverterIssue> {
    let mut items = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            ConverterArg::Positional(item) if !item.is_empty() => {
                items.push(regex::escape(item));
            }
            ConverterArg::Positional(_) => {
                return Err(ConverterIssue::InvalidArgs("empty `any` item".into()))
            }
            ConverterArg::Keyword(key, _) => {
                return Err(ConverterIssue::InvalidArgs(format!(
                    "unexpected argument `{key}`"
                )))
            }
        }
    }
    if items.is_empty() {
        return Err(ConverterIssue::InvalidArgs(
            "`any` needs at least one item".into(),
        ));
    }
    Ok(format!("(?:{})", items.join("|")))
}

fn accept_keywords(args: &[ConverterArg], allowed: &[&str]) -> Result<(), ConverterIssue> {
    for arg in args {
        match arg {
            ConverterArg::Keyword(key, _) if allowed.contains(&key.as_str()) => {}
            ConverterArg::Keyword(key, _) => {
                return Err(ConverterIssue::InvalidArgs(format!(
                    "unexpected argument `{key}`"
                )))
            }
            ConverterArg::Positional(value) => {
                return Err(ConverterIssue::InvalidArgs(format!(
                    "unexpected positional argument `{value}`"
                )))
            }
        }
    }
    Ok(())
}

fn keyword_usize(args: &[ConverterArg], name: &str) -> Result<Option<usize>, ConverterIssue> {
    args.iter()
        .find_map(|arg| match arg {
            ConverterArg::Keyword(key, value) if key == name => Some(value),
            _ => None,
        })
        .map(|value| {
            value.parse::<usize>().map_err(|_| {
                ConverterIssue::InvalidArgs(format!("`{name}` must be a non-negative integer"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn spec(name: &str, args: Vec<ConverterArg>) -> ConverterSpec {
        ConverterSpec {
            name: name.into(),
            args,
        }
    }

    fn kw(key: &str, value: &str) -> ConverterArg {
        ConverterArg::Keyword(key.into(), value.into())
    }

    #[rstest]
    #[case("default", vec![], "[^/?#]+")]
    #[case("string", vec![], "[^/?#]+")]
    #[case("string", vec![kw("length", "2")], "[^/?#]{2}")]
    #[case("string", vec![kw("minlength", "3")], "[^/?#]{3,}")]
    #[case("string", vec![kw("minlength", "2"), kw("maxlength", "4")], "[^/?#]{2,4}")]
    #[case("string", vec![kw("maxlength", "4")], "[^/?#]{1,4}")]
    #[case("int", vec![], r"-?\d+")]
    #[case("int", vec![kw("fixed_digits", "4")], r"-?\d{4}")]
    #[case("int", vec![kw("min", "1"), kw("max", "9")], r"-?\d+")]
    #[case("float", vec![], r"-?\d+\.\d+")]
    #[case("path", vec![], "[^?#]+")]
    #[case("any", vec![ConverterArg::Positional("a.b".into()), ConverterArg::Positional("c".into())], r"(?:a\.b|c)")]
    fn test_builtin_converter_regex(
        #[case] name: &str,
        #[case] args: Vec<ConverterArg>,
        #[case] expected: &str,
    ) {
        assert_eq!(
            builtin_converter_regex(&spec(name, args)).expect("Should translate"),
            expected
        );
    }

    #[rstest]
    fn test_uuid_converter_regex() {
        let fragment = builtin_converter_regex(&spec("uuid", vec![])).expect("Should translate");
        let re = regex::Regex::new(&format!("^{fragment}$")).expect("valid regex");
        assert!(re.is_match("e6c8ea5a-3c0b-4a45-9d6b-2a9a1c1f2f3e"));
        assert!(!re.is_match("e6c8ea5a3c0b4a459d6b2a9a1c1f2f3e"));
        assert!(!re.is_match("not-a-uuid"));
    }

    #[rstest]
    #[case("hex")]
    #[case("date")]
    #[case("INT")]
    fn test_unknown_converter(#[case] name: &str) {
        assert_eq!(
            builtin_converter_regex(&spec(name, vec![])),
            Err(ConverterIssue::Unknown)
        );
    }

    #[rstest]
    #[case(spec("string", vec![kw("size", "2")]))]
    #[case(spec("string", vec![kw("length", "two")]))]
    #[case(spec("string", vec![kw("minlength", "5"), kw("maxlength", "2")]))]
    #[case(spec("int", vec![kw("fixed_digits", "0")]))]
    #[case(spec("path", vec![kw("length", "2")]))]
    #[case(spec("uuid", vec![ConverterArg::Positional("x".into())]))]
    #[case(spec("any", vec![]))]
    #[case(spec("any", vec![kw("a", "b")]))]
    fn test_invalid_converter_args(#[case] spec: ConverterSpec) {
        assert!(matches!(
            builtin_converter_regex(&spec),
            Err(ConverterIssue::InvalidArgs(_))
        ));
    }
}
