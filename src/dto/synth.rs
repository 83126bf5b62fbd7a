use super::resolve::DtoDescriptor;
use crate::annotation::is_marker;
use crate::config::GeneratorConfig;
use crate::discovery::DTO_MARKER;
use crate::generator::templates::{render_unit, DtoTemplateData, PropertyView};
use crate::generator::GeneratedUnit;
use crate::graph::{Annotation, DeclarationGraph, Member};
use crate::propagation::{matches_ignored, propagate, render_all};

/// A property selected for projection, with the annotations it keeps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedProperty {
    pub member: Member,
    pub annotations: Vec<Annotation>,
}

/// Why an entity property was left out of the projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Ignored,
    Explicit,
    EqualityMachinery,
    IgnoredAttribute,
}

fn skip_reason<G: DeclarationGraph + ?Sized>(
    graph: &G,
    descriptor: &DtoDescriptor,
    property: &Member,
) -> Option<SkipReason> {
    if descriptor.ignored_properties.contains(&property.name) {
        Some(SkipReason::Ignored)
    } else if descriptor.explicit_member_names.contains(&property.name) {
        Some(SkipReason::Explicit)
    } else if property.is_equality_machinery() {
        Some(SkipReason::EqualityMachinery)
    } else if property
        .annotations
        .iter()
        .any(|a| matches_ignored(graph, &a.kind, &descriptor.ignored_attribute_types))
    {
        Some(SkipReason::IgnoredAttribute)
    } else {
        None
    }
}

/// Entity properties to project, in entity declaration order.
pub fn project_properties<G: DeclarationGraph + ?Sized>(
    graph: &G,
    descriptor: &DtoDescriptor,
) -> Vec<ProjectedProperty> {
    let Some(entity) = graph.resolve(&descriptor.entity_type) else {
        return Vec::new();
    };

    graph
        .fragments(&entity.identity)
        .into_iter()
        .flat_map(|fragment| fragment.properties())
        .filter(|property| match skip_reason(graph, descriptor, property) {
            Some(reason) => {
                tracing::trace!(dto = %descriptor.source, property = %property.name, ?reason, "property skipped");
                false
            }
            None => true,
        })
        .map(|property| ProjectedProperty {
            annotations: propagate(
                graph,
                &property.annotations,
                &descriptor.ignored_attribute_types,
                |a| is_marker(&a.kind, DTO_MARKER),
            ),
            member: property.clone(),
        })
        .collect()
}

fn property_view(property: &ProjectedProperty) -> PropertyView {
    PropertyView {
        attributes: render_all(&property.annotations),
        ty: property.member.ty.render(),
        name: property.member.name.clone(),
        initializer: property
            .member
            .initializer
            .as_deref()
            .map(|text| format!(" = {text};"))
            .unwrap_or_default(),
    }
}

/// Render the generated half of a dto.
pub fn synthesize_dto<G: DeclarationGraph + ?Sized>(
    graph: &G,
    descriptor: &DtoDescriptor,
    config: &GeneratorConfig,
) -> anyhow::Result<GeneratedUnit> {
    let properties = project_properties(graph, descriptor);
    let data = DtoTemplateData {
        source: descriptor.source.clone(),
        usings: config.dto_usings.clone(),
        namespace: descriptor.namespace.clone(),
        class_name: descriptor.name.clone(),
        properties: properties.iter().map(property_view).collect(),
    };
    Ok(GeneratedUnit::new(descriptor.output_key(), render_unit(&data)?))
}
