//! # Attribute Propagation
//!
//! Decides which annotations on a source member are copied onto the
//! generated member. Source order is preserved. An annotation is dropped when:
//!
//! 1. it is the marker consumed by the synthesizer (HTTP verb, `Dto`);
//! 2. its type is, or derives from, a type in the ignored set, found by
//!    walking the single-parent base chain through the graph;
//! 3. its type lives in a compiler-internal namespace. This rule applies
//!    regardless of configuration.

use crate::annotation::{render_annotation, type_identity};
use crate::graph::{Annotation, DeclarationGraph, TypeDescriptor};
use std::collections::BTreeSet;

/// Namespaces whose annotations are compiler machinery and never copied
pub const INTERNAL_NAMESPACES: &[&str] = &["System.Runtime.CompilerServices", "Microsoft.CodeAnalysis"];

/// True when an annotation kind belongs to a compiler-internal namespace.
pub fn is_internal(kind: &str) -> bool {
    INTERNAL_NAMESPACES.iter().any(|ns| {
        kind.strip_prefix(ns)
            .map(|rest| rest.starts_with('.'))
            .unwrap_or(false)
    })
}

/// True when `kind` is, or derives from, any type in `ignored`.
///
/// A generic-form kind is also matched by its open type identity, so
/// ``Acme.PiiAttribute`1`` and `Acme.PiiAttribute<T>` match an ignored
/// `Acme.PiiAttribute` and anything it derives from.
pub fn matches_ignored<G: DeclarationGraph + ?Sized>(
    graph: &G,
    kind: &str,
    ignored: &BTreeSet<TypeDescriptor>,
) -> bool {
    let open = type_identity(kind);
    ignored
        .iter()
        .filter_map(TypeDescriptor::named_identity)
        .map(type_identity)
        .any(|ancestor| {
            graph.is_or_derives_from(kind, ancestor)
                || (open != kind && graph.is_or_derives_from(open, ancestor))
        })
}

/// Annotations to copy onto a generated member, in source order.
pub fn propagate<G, F>(
    graph: &G,
    annotations: &[Annotation],
    ignored: &BTreeSet<TypeDescriptor>,
    is_consumed: F,
) -> Vec<Annotation>
where
    G: DeclarationGraph + ?Sized,
    F: Fn(&Annotation) -> bool,
{
    annotations
        .iter()
        .filter(|a| !is_consumed(a))
        .filter(|a| !is_internal(&a.kind))
        .filter(|a| !matches_ignored(graph, &a.kind, ignored))
        .cloned()
        .collect()
}

/// Render propagated annotations as source lines.
pub fn render_all(annotations: &[Annotation]) -> Vec<String> {
    annotations.iter().map(render_annotation).collect()
}
