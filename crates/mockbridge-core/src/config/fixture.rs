//! Fixture route definitions and the application built from them.

use crate::app::{App, AppError, AppRequest, PathParams};
use crate::error::PatternError;
use crate::types::method::HttpMethod;
use crate::types::response::{SyntheticResponse, APPLICATION_JSON, TEXT_HTML};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Contents of one fixture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureFile {
    pub routes: Vec<FixtureRoute>,
}

/// A rule answered with a canned response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRoute {
    /// Path template, e.g. `/items/<int:item_id>`
    pub path: String,
    /// Accepted methods (`GET` when empty)
    #[serde(default)]
    pub methods: Vec<HttpMethod>,
    /// Endpoint name; defaults to the path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub response: FixtureResponse,
}

/// Canned response for a fixture route.
///
/// String bodies are sent as HTML, other JSON values are encoded as JSON.
/// `<name>` placeholders in the body are replaced by path parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureResponse {
    /// HTTP status code (200 when omitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl FixtureResponse {
    fn render(&self, params: &PathParams) -> Result<SyntheticResponse, AppError> {
        let (body, content_type) = match &self.body {
            None => (Vec::new(), TEXT_HTML),
            Some(Value::String(text)) => (substitute(text, params).into_bytes(), TEXT_HTML),
            Some(value) => (
                serde_json::to_vec(&substitute_value(value, params))?,
                APPLICATION_JSON,
            ),
        };

        let mut response = SyntheticResponse::new(self.status.unwrap_or(200), body);
        for (name, value) in self.headers.iter().flatten() {
            response.headers.append(name.as_str(), substitute(value, params));
        }
        if !response.headers.contains("Content-Type") {
            response.headers.append("Content-Type", content_type);
        }
        Ok(response)
    }
}

impl App {
    /// Build an application answering every fixture route with its response.
    pub fn from_fixtures(routes: Vec<FixtureRoute>) -> Result<App, PatternError> {
        routes.into_iter().try_fold(App::new(), |app, route| {
            let endpoint = route.endpoint.clone().unwrap_or_else(|| route.path.clone());
            let response = route.response;
            app.add_url_rule(
                &route.path,
                &endpoint,
                &route.methods,
                Arc::new(move |_: &AppRequest, params: &PathParams| response.render(params)),
            )
        })
    }
}

fn substitute(text: &str, params: &PathParams) -> String {
    params.iter().fold(text.to_owned(), |acc, (name, value)| {
        acc.replace(&format!("<{name}>"), value)
    })
}

/// A string that is exactly `<name>` takes the parameter's JSON type.
fn substitute_value(value: &Value, params: &PathParams) -> Value {
    match value {
        Value::String(text) => {
            let whole = text
                .strip_prefix('<')
                .and_then(|t| t.strip_suffix('>'))
                .and_then(|name| params.raw(name));
            match whole {
                Some(raw) => typed(raw),
                None => Value::String(substitute(text, params)),
            }
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| substitute_value(v, params)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute_value(v, params)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn typed(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && raw.contains('.'))
        .map_or_else(|| Value::String(raw.to_owned()), Value::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Application;
    use rstest::rstest;
    use serde_json::json;

    fn route(path: &str, response: FixtureResponse) -> FixtureRoute {
        FixtureRoute {
            path: path.into(),
            methods: vec![],
            endpoint: None,
            response,
        }
    }

    fn body_of(app: &App, path: &str) -> (u16, Option<String>, String) {
        let response = app
            .handle(AppRequest::new(HttpMethod::Get, path))
            .expect("Should handle");
        let content_type = response.headers.get("Content-Type").map(str::to_owned);
        let body = String::from_utf8(response.body.drain().expect("body")).expect("utf8");
        (response.status, content_type, body)
    }

    #[rstest]
    fn test_fixture_json_body_with_typed_placeholder() {
        let app = App::from_fixtures(vec![route(
            "/items/<int:item_id>",
            FixtureResponse {
                status: None,
                headers: None,
                body: Some(json!({"id": "<item_id>", "label": "item <item_id>"})),
            },
        )])
        .expect("Should build");

        let (status, content_type, body) = body_of(&app, "/items/42");
        assert_eq!(status, 200);
        assert_eq!(content_type.as_deref(), Some(APPLICATION_JSON));
        let value: Value = serde_json::from_str(&body).expect("json");
        assert_eq!(value, json!({"id": 42, "label": "item 42"}));
    }

    #[rstest]
    fn test_fixture_text_body_and_headers() {
        let app = App::from_fixtures(vec![route(
            "/hello/<name>",
            FixtureResponse {
                status: Some(201),
                headers: Some(BTreeMap::from([("X-Name".to_string(), "<name>".to_string())])),
                body: Some(json!("Hello: <name>")),
            },
        )])
        .expect("Should build");

        let response = app
            .handle(AppRequest::new(HttpMethod::Get, "/hello/Frasier"))
            .expect("Should handle");
        assert_eq!(response.status, 201);
        assert_eq!(response.headers.get("X-Name"), Some("Frasier"));
        assert_eq!(response.headers.get("Content-Type"), Some(TEXT_HTML));
        assert_eq!(response.body.drain().expect("body"), b"Hello: Frasier");
    }

    #[rstest]
    #[case("42", json!(42))]
    #[case("-3", json!(-3))]
    #[case("4.5", json!(4.5))]
    #[case("abc", json!("abc"))]
    #[case("inf", json!("inf"))]
    fn test_typed_placeholder_values(#[case] raw: &str, #[case] expected: Value) {
        assert_eq!(typed(raw), expected);
    }

    #[rstest]
    fn test_fixture_with_unknown_converter_is_rejected() {
        let result = App::from_fixtures(vec![route("/<hex:v>", FixtureResponse::default())]);
        assert!(matches!(
            result,
            Err(PatternError::UnsupportedConverter { .. })
        ));
    }
}
