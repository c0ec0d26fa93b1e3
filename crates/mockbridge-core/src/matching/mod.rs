//! Path template parsing and translation into URL regexes.

mod converter;
mod pattern;
mod query;
mod template;
mod url;

pub use converter::{builtin_converter_regex, ConverterIssue};
pub use pattern::{compile_pattern, path_regex, CompiledPattern};
pub use query::parse_query_string;
pub use template::{parse_template, ConverterArg, ConverterSpec, Segment};
pub use url::{normalize_url, split_url, BaseUrl, UrlParts};
