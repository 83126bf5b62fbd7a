use super::route::{bind_parameters, report_unmatched, BoundParameter, RouteTemplate};
use super::HttpVerb;
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticReporter};
use crate::graph::{Annotation, Declaration, DeclarationGraph, Member, TypeDescriptor};
use crate::propagation::propagate;
use std::collections::{BTreeSet, HashSet};

/// Suffix removed from default routes and envelope names when `trim_async_suffix` is set
pub const ASYNC_SUFFIX: &str = "Async";

/// Carrier record for a non-GET operation's body parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEnvelope {
    pub type_name: String,
    pub fields: Vec<EnvelopeField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeField {
    /// Record component name (PascalCase)
    pub name: String,
    /// Parameter on the source method this field carries
    pub source_name: String,
    pub ty: TypeDescriptor,
}

/// One verb-marked method, resolved for synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub source_member: String,
    pub verb: HttpVerb,
    pub route: RouteTemplate,
    /// Name of the generated action
    pub method_name: String,
    pub return_type: TypeDescriptor,
    pub parameters: Vec<BoundParameter>,
    pub request_envelope: Option<RequestEnvelope>,
    /// Annotations copied onto the generated action, verb marker excluded
    pub annotations: Vec<Annotation>,
}

/// First verb marker on a member, with the verb it selects.
pub fn verb_marker(member: &Member) -> Option<(HttpVerb, &Annotation)> {
    member
        .annotations
        .iter()
        .find_map(|a| HttpVerb::from_kind(&a.kind).map(|verb| (verb, a)))
}

/// Uppercase the first character; the rest is kept as written.
pub fn to_pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn base_name<'a>(member: &'a str, config: &GeneratorConfig) -> &'a str {
    if !config.trim_async_suffix {
        return member;
    }
    match member.strip_suffix(ASYNC_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => member,
    }
}

/// Build the descriptor for one method, or `None` when it carries no verb marker.
///
/// Route parameters that no method parameter can fill are reported as
/// warnings; the operation is still produced.
pub fn resolve_operation<G: DeclarationGraph + ?Sized>(
    graph: &G,
    owner: &Declaration,
    member: &Member,
    config: &GeneratorConfig,
    reporter: &mut DiagnosticReporter,
) -> Option<OperationDescriptor> {
    if !member.is_method() {
        return None;
    }
    let (verb, marker) = verb_marker(member)?;
    let base = base_name(&member.name, config);

    let template = marker
        .positional(0)
        .and_then(|v| v.as_str())
        .unwrap_or(base);
    let route = RouteTemplate::parse(template);

    let location = format!("{}.{}", owner.identity, member.name);
    report_unmatched(&route, &member.parameters, &location, &member.name, reporter);

    let parameters = bind_parameters(&route, &member.parameters);
    let request_envelope = if verb.is_get() {
        None
    } else {
        build_envelope(base, &parameters, &location, reporter)
    };

    let method_name = marker
        .named_str("MethodName")
        .unwrap_or(&member.name)
        .to_string();

    let annotations = propagate(graph, &member.annotations, &BTreeSet::new(), |a| {
        HttpVerb::from_kind(&a.kind).is_some()
    });

    Some(OperationDescriptor {
        source_member: member.name.clone(),
        verb,
        route,
        method_name,
        return_type: member.ty.clone(),
        parameters,
        request_envelope,
        annotations,
    })
}

fn build_envelope(
    base: &str,
    parameters: &[BoundParameter],
    location: &str,
    reporter: &mut DiagnosticReporter,
) -> Option<RequestEnvelope> {
    let fields: Vec<EnvelopeField> = parameters
        .iter()
        .filter(|p| !p.is_route_bound())
        .map(|p| EnvelopeField {
            name: to_pascal_case(&p.parameter.name),
            source_name: p.parameter.name.clone(),
            ty: p.parameter.ty.clone(),
        })
        .collect();
    if fields.is_empty() {
        return None;
    }

    let type_name = format!("{base}Request");
    let mut seen = HashSet::new();
    for field in &fields {
        if !seen.insert(field.name.as_str()) {
            reporter.report(
                Diagnostic::new(
                    DiagnosticCode::ConflictingRequestEnvelope,
                    location,
                    format!(
                        "Parameter '{}' maps to field '{}' of '{}', which another parameter already uses",
                        field.source_name, field.name, type_name
                    ),
                )
                .with_suggestion("Rename one of the parameters"),
            );
        }
    }

    Some(RequestEnvelope { type_name, fields })
}
