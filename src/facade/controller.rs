use super::operation::{OperationDescriptor, RequestEnvelope};
use super::resolve::FacadeDescriptor;
use super::route::Binding;
use crate::annotation::format_value;
use crate::config::GeneratorConfig;
use crate::generator::templates::{
    render_unit, ActionView, ControllerTemplateData, RecordView, RequestsTemplateData,
};
use crate::generator::GeneratedUnit;
use crate::graph::AnnotationValue;
use crate::propagation::render_all;

/// Name of the body parameter carrying a request envelope
pub const ENVELOPE_PARAMETER: &str = "request";

/// Output key of a facade's controller unit
pub fn controller_key(descriptor: &FacadeDescriptor) -> String {
    format!("{}.g.cs", descriptor.controller_class())
}

/// Output key of a facade's request-envelope unit
pub fn requests_key(descriptor: &FacadeDescriptor) -> String {
    format!("{}Requests.g.cs", descriptor.controller_name)
}

/// Generated parameter list for an action.
///
/// GET actions take every source parameter, from the route or the query.
/// Other verbs take route-bound parameters followed by the envelope, if any.
pub fn action_parameters(op: &OperationDescriptor) -> Vec<String> {
    if op.verb.is_get() {
        return op
            .parameters
            .iter()
            .map(|p| {
                let source = match p.binding {
                    Binding::RouteBound => "FromRoute",
                    Binding::Free => "FromQuery",
                };
                format!("[{}] {} {}", source, p.parameter.ty, p.parameter.name)
            })
            .collect();
    }

    let mut parameters: Vec<String> = op
        .parameters
        .iter()
        .filter(|p| p.is_route_bound())
        .map(|p| format!("[FromRoute] {} {}", p.parameter.ty, p.parameter.name))
        .collect();
    if let Some(envelope) = &op.request_envelope {
        parameters.push(format!("[FromBody] {} {}", envelope.type_name, ENVELOPE_PARAMETER));
    }
    parameters
}

/// Arguments passed to the service, in the source method's parameter order.
pub fn call_arguments(op: &OperationDescriptor) -> Vec<String> {
    op.parameters
        .iter()
        .map(|p| {
            let field = op.request_envelope.as_ref().and_then(|envelope| {
                envelope
                    .fields
                    .iter()
                    .find(|f| f.source_name == p.parameter.name)
            });
            match (p.binding, field) {
                (Binding::Free, Some(field)) => format!("{}.{}", ENVELOPE_PARAMETER, field.name),
                _ => p.parameter.name.clone(),
            }
        })
        .collect()
}

/// Verb attribute re-stated on the generated action, e.g. `[HttpGet("{id}")]`.
pub fn verb_attribute(op: &OperationDescriptor) -> String {
    format!(
        "[{}({})]",
        op.verb.attribute_name(),
        format_value(&AnnotationValue::String(op.route.template.clone()))
    )
}

fn action_view(op: &OperationDescriptor) -> ActionView {
    let mut attributes = vec![verb_attribute(op)];
    attributes.extend(render_all(&op.annotations));
    ActionView {
        attributes,
        return_type: op.return_type.render(),
        name: op.method_name.clone(),
        parameters: action_parameters(op).join(", "),
        service_member: op.source_member.clone(),
        arguments: call_arguments(op).join(", "),
    }
}

fn record_view(envelope: &RequestEnvelope) -> RecordView {
    let components: Vec<String> = envelope
        .fields
        .iter()
        .map(|f| format!("{} {}", f.ty, f.name))
        .collect();
    RecordView {
        name: envelope.type_name.clone(),
        components: components.join(", "),
    }
}

/// Render the controller unit and, when any operation needs one, the
/// request-envelope unit.
pub fn synthesize_controller(
    descriptor: &FacadeDescriptor,
    config: &GeneratorConfig,
) -> anyhow::Result<Vec<GeneratedUnit>> {
    let mut usings = config.controller_usings.clone();
    if descriptor.needs_envelopes()
        && descriptor.dto_namespace != descriptor.controller_namespace
        && !usings.contains(&descriptor.dto_namespace)
    {
        usings.push(descriptor.dto_namespace.clone());
    }

    let controller = ControllerTemplateData {
        source: descriptor.source.clone(),
        usings,
        namespace: descriptor.controller_namespace.clone(),
        class_name: descriptor.controller_class(),
        service_type: descriptor.service_type.render(),
        actions: descriptor.operations.iter().map(action_view).collect(),
    };
    let mut units = vec![GeneratedUnit::new(
        controller_key(descriptor),
        render_unit(&controller)?,
    )];

    let records: Vec<RecordView> = descriptor
        .operations
        .iter()
        .filter_map(|op| op.request_envelope.as_ref())
        .map(record_view)
        .collect();
    if !records.is_empty() {
        let requests = RequestsTemplateData {
            source: descriptor.source.clone(),
            usings: config.dto_usings.clone(),
            namespace: descriptor.dto_namespace.clone(),
            records,
        };
        units.push(GeneratedUnit::new(
            requests_key(descriptor),
            render_unit(&requests)?,
        ));
    }

    Ok(units)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticReporter;
    use crate::facade::resolve_operation;
    use crate::graph::{Annotation, Declaration, DeclarationSet, Member, TypeDescriptor};

    fn operation(member: Member) -> OperationDescriptor {
        let graph = DeclarationSet::default();
        let owner = Declaration::class("App.UserFacade", "App");
        let mut reporter = DiagnosticReporter::new();
        resolve_operation(&graph, &owner, &member, &GeneratorConfig::default(), &mut reporter)
            .unwrap()
    }

    fn route(template: &str, verb: &str) -> Annotation {
        Annotation::new(verb).with_arg(AnnotationValue::String(template.into()))
    }

    #[test]
    fn test_get_wiring() {
        let op = operation(
            Member::method("GetUser", TypeDescriptor::named("App.User"))
                .with_param("id", TypeDescriptor::primitive("int"))
                .with_param("name", TypeDescriptor::primitive("string").nullable())
                .with_annotation(route("{id}", "Get")),
        );
        assert_eq!(
            action_parameters(&op),
            vec!["[FromRoute] int id", "[FromQuery] string? name"]
        );
        assert_eq!(call_arguments(&op), vec!["id", "name"]);
        assert_eq!(verb_attribute(&op), "[HttpGet(\"{id}\")]");
    }

    #[test]
    fn test_put_wiring_restores_source_order() {
        let op = operation(
            Member::method("UpdateUser", TypeDescriptor::named("App.User"))
                .with_param("name", TypeDescriptor::primitive("string"))
                .with_param("id", TypeDescriptor::primitive("int"))
                .with_param("age", TypeDescriptor::primitive("int").nullable())
                .with_annotation(route("{id}", "Put")),
        );
        assert_eq!(
            action_parameters(&op),
            vec!["[FromRoute] int id", "[FromBody] UpdateUserRequest request"]
        );
        assert_eq!(
            call_arguments(&op),
            vec!["request.Name", "id", "request.Age"]
        );
    }

    #[test]
    fn test_delete_with_only_route_params_has_no_body() {
        let op = operation(
            Member::method("DeleteUser", TypeDescriptor::primitive("void"))
                .with_param("id", TypeDescriptor::primitive("int"))
                .with_annotation(route("{id:int}", "Delete")),
        );
        assert!(op.request_envelope.is_none());
        assert_eq!(action_parameters(&op), vec!["[FromRoute] int id"]);
    }

    #[test]
    fn test_unbound_route_segment_keeps_generating() {
        let op = operation(
            Member::method("Lookup", TypeDescriptor::primitive("string"))
                .with_param("id", TypeDescriptor::primitive("int"))
                .with_annotation(route("{unknown}", "Get")),
        );
        assert_eq!(action_parameters(&op), vec!["[FromQuery] int id"]);
        assert_eq!(verb_attribute(&op), "[HttpGet(\"{unknown}\")]");
    }
}
