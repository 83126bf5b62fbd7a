use crate::annotation::{string_set, type_set};
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticReporter};
use crate::discovery::{find_marker, DTO_MARKER};
use crate::graph::{Declaration, DeclarationGraph, TypeDescriptor};
use std::collections::BTreeSet;

/// Resolved metadata for one dto declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtoDescriptor {
    /// Identity of the dto declaration
    pub source: String,
    pub name: String,
    pub namespace: String,
    pub entity_type: TypeDescriptor,
    pub ignored_properties: BTreeSet<String>,
    pub ignored_attribute_types: BTreeSet<TypeDescriptor>,
    /// Properties already declared by hand on the target
    pub explicit_member_names: BTreeSet<String>,
}

impl DtoDescriptor {
    /// Output key of the generated dto unit
    pub fn output_key(&self) -> String {
        format!("{}.g.cs", self.name)
    }
}

/// Resolve a discovered dto into a descriptor.
///
/// A target that is not partial gets a `non_partial_dto` error and no
/// descriptor. An entity type that cannot be resolved yields no descriptor
/// and no diagnostic.
pub fn resolve_dto<G: DeclarationGraph + ?Sized>(
    graph: &G,
    dto: &Declaration,
    reporter: &mut DiagnosticReporter,
) -> Option<DtoDescriptor> {
    let marker = find_marker(dto, DTO_MARKER)?;
    let fragments = graph.fragments(&dto.identity);

    let is_partial = dto.partial || fragments.iter().any(|f| f.partial);
    if !is_partial {
        reporter.report(
            Diagnostic::new(
                DiagnosticCode::NonPartialDto,
                &dto.identity,
                format!(
                    "Class '{}' with [Dto] attribute must be declared as partial",
                    dto.simple_name()
                ),
            )
            .with_suggestion(format!(
                "Declare it as 'public partial class {}'",
                dto.simple_name()
            )),
        );
        return None;
    }

    let entity_type = marker
        .generic_argument()
        .or_else(|| marker.positional(0).and_then(|v| v.as_type()))
        .cloned();
    let Some(entity_type) = entity_type else {
        tracing::debug!(dto = %dto.identity, "no entity type configured; dto skipped");
        return None;
    };
    if graph.resolve(&entity_type).is_none() {
        tracing::debug!(
            dto = %dto.identity,
            entity = %entity_type,
            "entity type not found in graph; dto skipped"
        );
        return None;
    }

    let explicit_member_names: BTreeSet<String> = fragments
        .iter()
        .flat_map(|fragment| fragment.properties())
        .map(|p| p.name.clone())
        .collect();

    Some(DtoDescriptor {
        source: dto.identity.clone(),
        name: dto.simple_name().to_string(),
        namespace: dto.namespace.clone(),
        entity_type,
        ignored_properties: string_set(marker.named_value("IgnoredProperties")),
        ignored_attribute_types: type_set(marker.named_value("IgnoredAttributes")),
        explicit_member_names,
    })
}
