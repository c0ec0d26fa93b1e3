//! Rule extraction from an application's route table.

use crate::app::Application;
use crate::error::ExtractionError;
use crate::types::route::RouteDescriptor;
use std::collections::HashSet;

/// Read the application's route table into descriptors, in rule order.
///
/// Methods are deduplicated per rule. A `(template, method)` pair that an
/// earlier rule already declared is dropped, since the application would
/// never route to the later rule; rules left without methods are skipped.
pub fn extract_routes(app: &dyn Application) -> Result<Vec<RouteDescriptor>, ExtractionError> {
    let rules = app.url_map().ok_or(ExtractionError::NoRouteTable)?;

    let mut seen = HashSet::new();
    let mut descriptors = Vec::with_capacity(rules.len());
    for rule in rules {
        if rule.rule.trim().is_empty() {
            return Err(ExtractionError::MissingTemplate {
                endpoint: rule.endpoint,
            });
        }
        if rule.methods.is_empty() {
            return Err(ExtractionError::NoMethods {
                template: rule.rule,
            });
        }

        let methods: Vec<_> = rule
            .methods
            .iter()
            .copied()
            .filter(|method| seen.insert((rule.rule.clone(), *method)))
            .collect();
        if methods.is_empty() {
            tracing::debug!(template = %rule.rule, "rule shadowed by earlier rules, skipped");
            continue;
        }

        descriptors.push(RouteDescriptor {
            path_template: rule.rule,
            methods,
            endpoint: rule.endpoint,
        });
    }
    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppError, AppRequest};
    use crate::types::method::HttpMethod;
    use crate::types::response::SyntheticResponse;
    use crate::types::route::UrlRule;
    use rstest::rstest;

    struct TableApp(Option<Vec<UrlRule>>);

    impl Application for TableApp {
        fn url_map(&self) -> Option<Vec<UrlRule>> {
            self.0.clone()
        }

        fn handle(&self, _: AppRequest) -> Result<SyntheticResponse, AppError> {
            Ok(SyntheticResponse::text(""))
        }
    }

    use HttpMethod::{Delete, Get, Post};

    #[rstest]
    fn test_extract_preserves_rule_order() {
        let app = TableApp(Some(vec![
            UrlRule::new("/b", &[Get], "b"),
            UrlRule::new("/a/<int:id>", &[Post, Get], "a"),
            UrlRule::new("/", &[Delete], "root"),
        ]));
        let routes = extract_routes(&app).expect("Should extract");
        let templates: Vec<&str> = routes.iter().map(|r| r.path_template.as_str()).collect();
        assert_eq!(templates, vec!["/b", "/a/<int:id>", "/"]);
        assert_eq!(routes[1].methods, vec![Post, Get]);
        assert_eq!(routes[1].endpoint, "a");
    }

    #[rstest]
    fn test_extract_dedupes_template_method_pairs() {
        let app = TableApp(Some(vec![
            UrlRule::new("/x", &[Get, Get, Post], "first"),
            UrlRule::new("/x", &[Get], "shadowed"),
            UrlRule::new("/x", &[Get, Delete], "partial"),
        ]));
        let routes = extract_routes(&app).expect("Should extract");
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].methods, vec![Get, Post]);
        assert_eq!(routes[1].endpoint, "partial");
        assert_eq!(routes[1].methods, vec![Delete]);
    }

    #[rstest]
    fn test_extract_empty_table_is_not_an_error() {
        let routes = extract_routes(&TableApp(Some(vec![]))).expect("Should extract");
        assert!(routes.is_empty());
    }

    #[rstest]
    #[case(TableApp(None), "no route table")]
    #[case(TableApp(Some(vec![UrlRule::new("", &[Get], "blank")])), "`blank` has no path template")]
    #[case(TableApp(Some(vec![UrlRule::new("/x", &[], "x")])), "declares no HTTP methods")]
    fn test_extract_errors(#[case] app: TableApp, #[case] message: &str) {
        let err = extract_routes(&app).expect_err("Should fail");
        assert!(err.to_string().contains(message), "{err}");
    }
}
