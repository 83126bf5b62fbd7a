use super::operation::{resolve_operation, OperationDescriptor};
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticReporter};
use crate::discovery::{find_marker, FACADE_MARKER};
use crate::graph::{Annotation, Declaration, DeclarationGraph, TypeDescriptor};
use std::collections::HashMap;

const FACADE_SUFFIX: &str = "Facade";
const INTERFACE_PREFIX: &str = "I";

/// Resolved metadata for one facade declaration.
///
/// Built fresh each pass and consumed once by the controller synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeDescriptor {
    /// Identity of the facade declaration this was resolved from
    pub source: String,
    pub controller_name: String,
    pub service_type: TypeDescriptor,
    pub controller_namespace: String,
    /// Namespace for request envelopes
    pub dto_namespace: String,
    pub operations: Vec<OperationDescriptor>,
}

impl FacadeDescriptor {
    /// Simple name of the generated controller class
    pub fn controller_class(&self) -> String {
        format!("{}Controller", self.controller_name)
    }

    pub fn needs_envelopes(&self) -> bool {
        self.operations
            .iter()
            .any(|op| op.request_envelope.is_some())
    }
}

/// Service type the controller forwards to.
///
/// Checked in order: the facade itself when it is an interface, the generic
/// marker argument, the named `Service` value, then the first implemented
/// interface.
pub fn resolve_service_type(facade: &Declaration, marker: &Annotation) -> Option<TypeDescriptor> {
    if facade.is_interface() {
        return Some(TypeDescriptor::named(facade.identity.clone()));
    }
    marker
        .generic_argument()
        .or_else(|| marker.named_value("Service").and_then(|v| v.as_type()))
        .or_else(|| facade.interfaces.first())
        .cloned()
}

/// Controller name: the explicit positional name when non-empty, else derived
/// from the facade's simple name.
pub fn resolve_controller_name(facade: &Declaration, marker: &Annotation) -> String {
    if let Some(explicit) = marker.positional_str(0) {
        return explicit.to_string();
    }
    let name = facade.simple_name();
    let derived = if facade.is_interface() {
        name.strip_prefix(INTERFACE_PREFIX)
    } else {
        name.strip_suffix(FACADE_SUFFIX)
    };
    match derived {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => name.to_string(),
    }
}

/// Resolve a discovered facade into a descriptor.
///
/// Returns `None` without a diagnostic when no service type can be found.
pub fn resolve_facade<G: DeclarationGraph + ?Sized>(
    graph: &G,
    facade: &Declaration,
    config: &GeneratorConfig,
    reporter: &mut DiagnosticReporter,
) -> Option<FacadeDescriptor> {
    let marker = find_marker(facade, FACADE_MARKER)?;

    let Some(service_type) = resolve_service_type(facade, marker) else {
        tracing::debug!(
            facade = %facade.identity,
            "no service type resolvable; facade skipped"
        );
        return None;
    };

    let controller_name = resolve_controller_name(facade, marker);
    let controller_namespace = marker
        .named_str("ControllerNamespace")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.Controllers", facade.namespace));
    let dto_namespace = marker
        .named_str("DtoNamespace")
        .map(str::to_string)
        .unwrap_or_else(|| controller_namespace.clone());

    let operations: Vec<OperationDescriptor> = graph
        .fragments(&facade.identity)
        .into_iter()
        .flat_map(|fragment| fragment.methods().map(move |m| (fragment, m)))
        .filter_map(|(fragment, member)| {
            resolve_operation(graph, fragment, member, config, reporter)
        })
        .collect();
    report_envelope_name_conflicts(facade, &operations, reporter);

    tracing::debug!(
        facade = %facade.identity,
        controller = %controller_name,
        service = %service_type,
        operations = operations.len(),
        "resolved facade"
    );

    Some(FacadeDescriptor {
        source: facade.identity.clone(),
        controller_name,
        service_type,
        controller_namespace,
        dto_namespace,
        operations,
    })
}

/// Warn for each operation whose request-envelope record name an earlier
/// operation on the same facade already uses.
fn report_envelope_name_conflicts(
    facade: &Declaration,
    operations: &[OperationDescriptor],
    reporter: &mut DiagnosticReporter,
) {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for op in operations {
        let Some(envelope) = &op.request_envelope else {
            continue;
        };
        match seen.get(envelope.type_name.as_str()) {
            Some(first) => reporter.report(
                Diagnostic::new(
                    DiagnosticCode::ConflictingRequestEnvelope,
                    format!("{}.{}", facade.identity, op.source_member),
                    format!(
                        "Request record '{}' is already generated for '{}'",
                        envelope.type_name, first
                    ),
                )
                .with_suggestion("Rename one of the overloads"),
            ),
            None => {
                seen.insert(&envelope.type_name, &op.source_member);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::{AnnotationValue, DeclarationSet, Member};

    fn facade_marker() -> Annotation {
        Annotation::new("Facadegen.HttpFacadeAttribute")
    }

    #[test]
    fn test_controller_name_derivation() {
        let class = Declaration::class("App.UserServiceFacade", "App");
        assert_eq!(resolve_controller_name(&class, &facade_marker()), "UserService");

        let plain = Declaration::class("App.Orders", "App");
        assert_eq!(resolve_controller_name(&plain, &facade_marker()), "Orders");

        let iface = Declaration::interface("App.IInventory", "App");
        assert_eq!(resolve_controller_name(&iface, &facade_marker()), "Inventory");

        let bare = Declaration::class("App.Facade", "App");
        assert_eq!(resolve_controller_name(&bare, &facade_marker()), "Facade");

        let explicit = facade_marker().with_arg(AnnotationValue::String("Accounts".into()));
        assert_eq!(resolve_controller_name(&class, &explicit), "Accounts");

        let empty = facade_marker().with_arg(AnnotationValue::String(String::new()));
        assert_eq!(resolve_controller_name(&class, &empty), "UserService");
    }

    #[test]
    fn test_service_type_priority() {
        let class = Declaration::class("App.UserFacade", "App")
            .with_interface(TypeDescriptor::named("App.IFirst"))
            .with_interface(TypeDescriptor::named("App.ISecond"));

        assert_eq!(
            resolve_service_type(&class, &facade_marker()),
            Some(TypeDescriptor::named("App.IFirst"))
        );

        let named = facade_marker().with_named(
            "Service",
            AnnotationValue::TypeRef(TypeDescriptor::named("App.IExplicit")),
        );
        assert_eq!(
            resolve_service_type(&class, &named),
            Some(TypeDescriptor::named("App.IExplicit"))
        );

        let generic = named.with_type_arg(TypeDescriptor::named("App.IGeneric"));
        assert_eq!(
            resolve_service_type(&class, &generic),
            Some(TypeDescriptor::named("App.IGeneric"))
        );

        let iface = Declaration::interface("App.IUsers", "App");
        assert_eq!(
            resolve_service_type(&iface, &generic),
            Some(TypeDescriptor::named("App.IUsers"))
        );
    }

    #[test]
    fn test_unresolvable_service_is_silent() {
        let lone = Declaration::class("App.LoneFacade", "App").with_annotation(facade_marker());
        let graph = DeclarationSet::new(vec![lone.clone()]);
        let mut reporter = DiagnosticReporter::new();
        let descriptor = resolve_facade(&graph, &lone, &GeneratorConfig::default(), &mut reporter);
        assert!(descriptor.is_none());
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_namespaces_and_operations() {
        let facade = Declaration::interface("App.Services.IUserService", "App.Services")
            .with_annotation(facade_marker().with_named(
                "DtoNamespace",
                AnnotationValue::String("App.Contracts".into()),
            ))
            .with_member(
                Member::method("GetUser", TypeDescriptor::named("App.User"))
                    .with_annotation(Annotation::new("Get")),
            )
            .with_member(Member::method("Internal", TypeDescriptor::primitive("void")))
            .with_member(
                Member::method("DeleteUser", TypeDescriptor::primitive("void"))
                    .with_annotation(Annotation::new("Delete")),
            );
        let graph = DeclarationSet::new(vec![facade.clone()]);
        let mut reporter = DiagnosticReporter::new();
        let descriptor =
            resolve_facade(&graph, &facade, &GeneratorConfig::default(), &mut reporter).unwrap();

        assert_eq!(descriptor.controller_name, "UserService");
        assert_eq!(descriptor.controller_class(), "UserServiceController");
        assert_eq!(descriptor.controller_namespace, "App.Services.Controllers");
        assert_eq!(descriptor.dto_namespace, "App.Contracts");
        let names: Vec<_> = descriptor
            .operations
            .iter()
            .map(|op| op.source_member.as_str())
            .collect();
        assert_eq!(names, vec!["GetUser", "DeleteUser"]);
        assert!(!descriptor.needs_envelopes());
    }

    #[test]
    fn test_operations_gathered_across_fragments() {
        let first = Declaration::class("App.OrderFacade", "App")
            .partial()
            .with_interface(TypeDescriptor::named("App.IOrders"))
            .with_annotation(facade_marker())
            .with_member(
                Member::method("List", TypeDescriptor::primitive("void"))
                    .with_annotation(Annotation::new("Get")),
            );
        let second = Declaration::class("App.OrderFacade", "App").partial().with_member(
            Member::method("Create", TypeDescriptor::primitive("void"))
                .with_param("sku", TypeDescriptor::primitive("string"))
                .with_annotation(Annotation::new("Post")),
        );
        let graph = DeclarationSet::new(vec![first.clone(), second]);
        let mut reporter = DiagnosticReporter::new();
        let descriptor =
            resolve_facade(&graph, &first, &GeneratorConfig::default(), &mut reporter).unwrap();
        assert_eq!(descriptor.operations.len(), 2);
        assert!(descriptor.needs_envelopes());
    }

    #[test]
    fn test_overloads_sharing_a_record_name_warn() {
        let facade = Declaration::interface("App.IOrders", "App")
            .with_annotation(facade_marker())
            .with_member(
                Member::method("Create", TypeDescriptor::primitive("void"))
                    .with_param("sku", TypeDescriptor::primitive("string"))
                    .with_annotation(Annotation::new("Post")),
            )
            .with_member(
                Member::method("Create", TypeDescriptor::primitive("void"))
                    .with_param("sku", TypeDescriptor::primitive("string"))
                    .with_param("quantity", TypeDescriptor::primitive("int"))
                    .with_annotation(
                        Annotation::new("Post")
                            .with_arg(AnnotationValue::String("bulk".into()))
                            .with_named("MethodName", AnnotationValue::String("CreateBulk".into())),
                    ),
            );
        let graph = DeclarationSet::new(vec![facade.clone()]);
        let mut reporter = DiagnosticReporter::new();
        let descriptor =
            resolve_facade(&graph, &facade, &GeneratorConfig::default(), &mut reporter).unwrap();

        assert_eq!(descriptor.operations.len(), 2);
        let diagnostics = reporter.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::ConflictingRequestEnvelope);
        assert_eq!(diagnostics[0].location, "App.IOrders.Create");
        assert!(diagnostics[0].message.contains("'CreateRequest'"));
    }
}
