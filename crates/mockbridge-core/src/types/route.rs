use crate::types::method::HttpMethod;

/// One entry of an application's route table, as the application exposes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRule {
    /// Path template, e.g. `/items/<int:item_id>`
    pub rule: String,
    /// Methods the rule accepts, in declaration order
    pub methods: Vec<HttpMethod>,
    /// Name of the handler bound to the rule
    pub endpoint: String,
}

impl UrlRule {
    pub fn new(rule: impl Into<String>, methods: &[HttpMethod], endpoint: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            methods: methods.to_vec(),
            endpoint: endpoint.into(),
        }
    }
}

/// Normalised rule produced by extraction.
///
/// Lives for a single registration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path_template: String,
    /// Distinct methods in declaration order
    pub methods: Vec<HttpMethod>,
    /// Opaque handler reference
    pub endpoint: String,
}
