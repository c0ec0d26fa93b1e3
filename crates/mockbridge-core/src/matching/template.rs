//! Path template parsing (`/items/<int:item_id>`).

use crate::error::PatternError;

/// Piece of a parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text matched verbatim
    Literal(String),
    /// Bracketed placeholder
    Param { name: String, converter: ConverterSpec },
}

/// Converter named by a placeholder, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterSpec {
    pub name: String,
    pub args: Vec<ConverterArg>,
}

impl ConverterSpec {
    /// Converter used by bare `<name>` placeholders.
    pub fn default_converter() -> Self {
        Self {
            name: "default".into(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterArg {
    Positional(String),
    Keyword(String, String),
}

/// Split a template into literal and placeholder segments.
///
/// Placeholders take the forms `<name>`, `<converter:name>` and
/// `<converter(args):name>`. Templates must start with `/`.
pub fn parse_template(template: &str) -> Result<Vec<Segment>, PatternError> {
    let malformed = |detail: &str| PatternError::MalformedTemplate {
        template: template.to_owned(),
        detail: detail.to_owned(),
    };

    if !template.starts_with('/') {
        return Err(malformed("template must start with '/'"));
    }

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(open) = rest.find(['<', '>']) {
        if rest[open..].starts_with('>') {
            return Err(malformed("unexpected '>'"));
        }
        literal.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let close = after_open
            .find('>')
            .ok_or_else(|| malformed("unclosed '<'"))?;
        let inner = &after_open[..close];
        if inner.contains('<') {
            return Err(malformed("nested '<'"));
        }

        let (name, converter) = parse_placeholder(inner).map_err(|detail| malformed(&detail))?;
        if segments
            .iter()
            .any(|s| matches!(s, Segment::Param { name: n, .. } if *n == name))
        {
            return Err(malformed(&format!("duplicate parameter `{name}`")));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Param { name, converter });
        rest = &after_open[close + 1..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn parse_placeholder(inner: &str) -> Result<(String, ConverterSpec), String> {
    let inner = inner.trim();

    let (converter, variable) = if let Some(paren) = inner.find('(') {
        let close = inner[paren..]
            .find(')')
            .map(|i| paren + i)
            .ok_or_else(|| format!("unclosed '(' in `<{inner}>`"))?;
        let name = &inner[..paren];
        let args = parse_args(&inner[paren + 1..close])?;
        let variable = inner[close + 1..]
            .strip_prefix(':')
            .ok_or_else(|| format!("expected ':' after converter arguments in `<{inner}>`"))?;
        (
            ConverterSpec {
                name: name.trim().to_owned(),
                args,
            },
            variable,
        )
    } else if let Some((name, variable)) = inner.split_once(':') {
        (
            ConverterSpec {
                name: name.trim().to_owned(),
                args: Vec::new(),
            },
            variable,
        )
    } else {
        (ConverterSpec::default_converter(), inner)
    };

    let variable = variable.trim();
    if !is_identifier(&converter.name) {
        return Err(format!("invalid converter name `{}`", converter.name));
    }
    if !is_identifier(variable) {
        return Err(format!("invalid parameter name `{variable}`"));
    }
    Ok((variable.to_owned(), converter))
}

fn parse_args(raw: &str) -> Result<Vec<ConverterArg>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if is_identifier(key) {
                    Ok(ConverterArg::Keyword(key.to_owned(), unquote(value.trim())))
                } else {
                    Err(format!("invalid argument name `{key}`"))
                }
            }
            None => Ok(ConverterArg::Positional(unquote(arg))),
        })
        .collect()
}

fn unquote(value: &str) -> String {
    let quoted = value.len() >= 2
        && ((value.starts_with('\'') && value.ends_with('\''))
            || (value.starts_with('"') && value.ends_with('"')));
    if quoted {
        value[1..value.len() - 1].to_owned()
    } else {
        value.to_owned()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
