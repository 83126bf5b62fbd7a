use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticReporter};
use crate::graph::Parameter;
use std::collections::BTreeSet;

/// A parsed route template.
///
/// Segments are split on `/` with empty segments dropped. A segment written
/// `{name}` or `{name:constraint}` names a route parameter; the constraint is
/// kept in the rendered route but ignored for binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    pub template: String,
    pub param_names: BTreeSet<String>,
}

impl RouteTemplate {
    pub fn parse(template: &str) -> Self {
        let param_names = template
            .split('/')
            .filter(|segment| !segment.is_empty())
            .filter_map(route_param_name)
            .map(str::to_string)
            .collect();
        RouteTemplate {
            template: template.to_string(),
            param_names,
        }
    }

    pub fn binds(&self, name: &str) -> bool {
        self.param_names.contains(name)
    }

    /// Route parameter names with no method parameter of the same name.
    pub fn unmatched<'a>(&'a self, parameters: &[Parameter]) -> Vec<&'a str> {
        self.param_names
            .iter()
            .filter(|name| !parameters.iter().any(|p| &p.name == *name))
            .map(String::as_str)
            .collect()
    }
}

fn route_param_name(segment: &str) -> Option<&str> {
    let inner = segment.strip_prefix('{')?.strip_suffix('}')?;
    let name = match inner.split_once(':') {
        Some((name, _constraint)) => name,
        None => inner,
    };
    (!name.is_empty()).then_some(name)
}

/// Where a method parameter's value comes from on the generated action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Named by a `{segment}` of the route template
    RouteBound,
    /// Query string on GET, request envelope otherwise
    Free,
}

/// A method parameter with its binding classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundParameter {
    pub parameter: Parameter,
    pub binding: Binding,
}

impl BoundParameter {
    pub fn is_route_bound(&self) -> bool {
        self.binding == Binding::RouteBound
    }
}

/// Classify each parameter against the route, in declared order.
pub fn bind_parameters(route: &RouteTemplate, parameters: &[Parameter]) -> Vec<BoundParameter> {
    parameters
        .iter()
        .map(|p| BoundParameter {
            parameter: p.clone(),
            binding: if route.binds(&p.name) {
                Binding::RouteBound
            } else {
                Binding::Free
            },
        })
        .collect()
}

/// Warn once per route parameter that no method parameter can fill.
pub fn report_unmatched(
    route: &RouteTemplate,
    parameters: &[Parameter],
    location: &str,
    member: &str,
    reporter: &mut DiagnosticReporter,
) {
    for name in route.unmatched(parameters) {
        reporter.report(
            Diagnostic::new(
                DiagnosticCode::UnmatchedRouteParameter,
                location,
                format!(
                    "Route parameter '{}' in route '{}' not found in the parameters of '{}'",
                    name, route.template, member
                ),
            )
            .with_suggestion(format!(
                "Add a parameter named '{name}' to '{member}' or remove it from the route"
            )),
        );
    }
}
