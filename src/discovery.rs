//! # Declaration Discovery
//!
//! Selects facade and dto candidates from the graph by marker annotation.
//!
//! A marker matches by simple name in plain or generic form, so
//! `HttpFacade`, `HttpFacadeAttribute`, `Facadegen.HttpFacadeAttribute` and
//! `HttpFacade<IUserService>` are all facade markers.
//!
//! Declarations split across several fragments are reported once: the first
//! marked fragment for an identity wins and later ones are skipped.

use crate::annotation::is_marker;
use crate::graph::{Annotation, Declaration, DeclarationGraph};
use std::collections::HashSet;

/// Marker selecting facade declarations
pub const FACADE_MARKER: &str = "HttpFacade";
/// Marker selecting dto declarations
pub const DTO_MARKER: &str = "Dto";

/// Deduplicated, disjoint candidate lists in graph order
#[derive(Debug, Default)]
pub struct Discovered<'g> {
    pub facades: Vec<&'g Declaration>,
    pub dtos: Vec<&'g Declaration>,
}

/// First annotation on `declaration` naming `marker`.
pub fn find_marker<'d>(declaration: &'d Declaration, marker: &str) -> Option<&'d Annotation> {
    declaration
        .annotations
        .iter()
        .find(|a| is_marker(&a.kind, marker))
}

/// Filter the graph for facade and dto candidates.
///
/// A declaration carrying both markers is treated as a facade only.
pub fn discover<G: DeclarationGraph + ?Sized>(graph: &G) -> Discovered<'_> {
    let mut seen = HashSet::new();
    let mut found = Discovered::default();

    for declaration in graph.declarations() {
        let is_facade = find_marker(declaration, FACADE_MARKER).is_some();
        let is_dto = find_marker(declaration, DTO_MARKER).is_some();
        if !is_facade && !is_dto {
            continue;
        }
        if !seen.insert(declaration.identity.as_str()) {
            tracing::debug!(identity = %declaration.identity, "skipping repeated fragment");
            continue;
        }
        if is_facade {
            if is_dto {
                tracing::warn!(
                    identity = %declaration.identity,
                    "declaration carries both facade and dto markers; treating as facade"
                );
            }
            found.facades.push(declaration);
        } else {
            found.dtos.push(declaration);
        }
    }

    tracing::debug!(
        facades = found.facades.len(),
        dtos = found.dtos.len(),
        "discovery complete"
    );
    found
}
