//! In-process application with werkzeug-style routing.

use crate::app::{AppError, AppRequest, Application, PathParams};
use crate::error::PatternError;
use crate::matching::{builtin_converter_regex, path_regex, ConverterIssue};
use crate::types::body::Body;
use crate::types::method::HttpMethod;
use crate::types::response::{SyntheticResponse, TEXT_HTML};
use crate::types::route::UrlRule;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Request handler bound to a rule.
pub type Handler =
    Arc<dyn Fn(&AppRequest, &PathParams) -> Result<SyntheticResponse, AppError> + Send + Sync>;

const NOT_FOUND_BODY: &str = "<!doctype html>\n<html lang=en>\n<title>404 Not Found</title>\n\
<h1>Not Found</h1>\n<p>The requested URL was not found on the server. If you entered the URL \
manually please check your spelling and try again.</p>\n";

const METHOD_NOT_ALLOWED_BODY: &str = "<!doctype html>\n<html lang=en>\n\
<title>405 Method Not Allowed</title>\n<h1>Method Not Allowed</h1>\n\
<p>The method is not allowed for the requested URL.</p>\n";

struct Rule {
    template: String,
    methods: Vec<HttpMethod>,
    endpoint: String,
    matcher: Regex,
    params: Vec<String>,
    handler: Handler,
    /// `OPTIONS` was added by the router rather than listed by the rule
    automatic_options: bool,
}

/// Application routing requests to handlers by path template and method.
///
/// Rules are matched in the order they were added; the first rule whose
/// template matches the path and which accepts the method handles the request.
#[derive(Default)]
pub struct App {
    rules: Vec<Rule>,
    converters: HashMap<String, String>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom converter for this application's own routing.
    ///
    /// Custom converters are not known to the pattern translator, so rules
    /// using them cannot be bridged to a mocking surface.
    pub fn converter(mut self, name: impl Into<String>, regex: impl Into<String>) -> Self {
        self.converters.insert(name.into(), regex.into());
        self
    }

    /// Add a rule whose endpoint name is its template.
    pub fn route<F>(self, template: &str, methods: &[HttpMethod], handler: F) -> Result<Self, PatternError>
    where
        F: Fn(&AppRequest, &PathParams) -> Result<SyntheticResponse, AppError> + Send + Sync + 'static,
    {
        self.add_url_rule(template, template, methods, Arc::new(handler))
    }

    /// Add a rule. An empty method list means `GET`.
    ///
    /// Rules accepting `GET` also accept `HEAD`, and every rule accepts
    /// `OPTIONS`; unless listed explicitly, the router answers it itself.
    pub fn add_url_rule(
        mut self,
        template: &str,
        endpoint: &str,
        methods: &[HttpMethod],
        handler: Handler,
    ) -> Result<Self, PatternError> {
        let converters = &self.converters;
        let (body, params) = path_regex(template, |spec| match converters.get(&spec.name) {
            Some(custom) if spec.args.is_empty() => Ok(custom.clone()),
            Some(_) => Err(ConverterIssue::InvalidArgs(
                "custom converters take no arguments".into(),
            )),
            None => builtin_converter_regex(spec),
        })?;
        let matcher = Regex::new(&format!("^{body}$"))?;

        let mut rule_methods = Vec::with_capacity(methods.len().max(1));
        for method in methods {
            if !rule_methods.contains(method) {
                rule_methods.push(*method);
            }
        }
        if rule_methods.is_empty() {
            rule_methods.push(HttpMethod::Get);
        }
        if rule_methods.contains(&HttpMethod::Get) && !rule_methods.contains(&HttpMethod::Head) {
            rule_methods.push(HttpMethod::Head);
        }
        let automatic_options = !rule_methods.contains(&HttpMethod::Options);
        if automatic_options {
            rule_methods.push(HttpMethod::Options);
        }

        self.rules.push(Rule {
            template: template.to_owned(),
            methods: rule_methods,
            endpoint: endpoint.to_owned(),
            matcher,
            params,
            handler,
            automatic_options,
        });
        Ok(self)
    }

    /// Methods accepted by any rule matching `path`, in rule order.
    fn allowed_methods(&self, path: &str) -> Vec<HttpMethod> {
        let mut allowed = Vec::new();
        for rule in self.rules.iter().filter(|rule| rule.matcher.is_match(path)) {
            for method in &rule.methods {
                if !allowed.contains(method) {
                    allowed.push(*method);
                }
            }
        }
        allowed
    }

    fn route_request(&self, request: &AppRequest) -> Result<SyntheticResponse, AppError> {
        if request.method == HttpMethod::Options {
            let first = self.rules.iter().find(|rule| rule.matcher.is_match(&request.path));
            if first.is_some_and(|rule| rule.automatic_options) {
                return Ok(SyntheticResponse::new(200, Body::Empty)
                    .with_header("Allow", join_methods(&self.allowed_methods(&request.path))));
            }
        }

        let mut allowed: Vec<HttpMethod> = Vec::new();

        for rule in &self.rules {
            let Some(caps) = rule.matcher.captures(&request.path) else {
                continue;
            };
            if !rule.methods.contains(&request.method) {
                for method in &rule.methods {
                    if !allowed.contains(method) {
                        allowed.push(*method);
                    }
                }
                continue;
            }

            let params = rule
                .params
                .iter()
                .zip(caps.iter().skip(1))
                .filter_map(|(name, m)| m.map(|m| (name.clone(), decode(m.as_str()))))
                .collect();

            tracing::trace!(endpoint = %rule.endpoint, path = %request.path, "matched rule");
            return (rule.handler)(request, &PathParams::new(params));
        }

        if allowed.is_empty() {
            return Ok(SyntheticResponse::new(404, NOT_FOUND_BODY)
                .with_header("Content-Type", TEXT_HTML));
        }
        Ok(SyntheticResponse::new(405, METHOD_NOT_ALLOWED_BODY)
            .with_header("Content-Type", TEXT_HTML)
            .with_header("Allow", join_methods(&allowed)))
    }
}

impl Application for App {
    fn url_map(&self) -> Option<Vec<UrlRule>> {
        Some(
            self.rules
                .iter()
                .map(|rule| UrlRule::new(rule.template.clone(), &rule.methods, rule.endpoint.clone()))
                .collect(),
        )
    }

    fn handle(&self, request: AppRequest) -> Result<SyntheticResponse, AppError> {
        let mut response = self.route_request(&request)?;
        let head = request.method == HttpMethod::Head;

        if !response.headers.contains("Content-Type") {
            response.headers.append("Content-Type", TEXT_HTML);
        }
        if let Some(len) = response.body.len_hint() {
            if !response.headers.contains("Content-Length") {
                response.headers.append("Content-Length", len.to_string());
            }
        }
        if head {
            response.body = Body::Empty;
        }
        Ok(response)
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.template.as_str()).collect::<Vec<_>>(),
            )
            .field("converters", &self.converters)
            .finish()
    }
}

fn join_methods(methods: &[HttpMethod]) -> String {
    methods
        .iter()
        .map(HttpMethod::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_owned())
}
