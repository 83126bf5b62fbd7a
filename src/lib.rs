//! # facadegen
//!
//! **facadegen** reads a graph of annotated type declarations and
//! deterministically synthesizes two kinds of C# source:
//!
//! - **Controllers** for service facades: every method marked `[Get]`,
//!   `[Post]`, `[Put]`, `[Delete]` or `[Patch]` becomes an ASP.NET action that
//!   forwards to the service, with route, query and body bindings derived from
//!   the route template
//! - **Dto projections** for entities: a partial class marked `[Dto<T>]`
//!   receives one property per entity property that is neither ignored nor
//!   already written by hand
//!
//! ## Architecture
//!
//! - **[`graph`]** - Declaration model, the [`DeclarationGraph`] query trait and snapshot loading
//! - **[`annotation`]** - Typed access to annotation values and rendering back to source
//! - **[`discovery`]** - Selects facade and dto declarations by marker
//! - **[`facade`]** - Facade resolution, route binding and controller synthesis
//! - **[`dto`]** - Dto resolution and projection synthesis
//! - **[`propagation`]** - Which source annotations are copied onto generated members
//! - **[`diagnostics`]** - Malformed-input findings reported alongside output
//! - **[`generator`]** - Runs a pass and writes generated units
//! - **[`config`]** / **[`logging`]** / **[`cli`]** - Binary support
//!
//! ```text
//! DeclarationGraph → discovery → facade::resolve_facade → facade::synthesize_controller ┐
//!                              → dto::resolve_dto       → dto::synthesize_dto          ┴→ PassOutput
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use facadegen::{load_graph, print_diagnostics, write_units, Generator, GeneratorConfig};
//! use std::path::Path;
//!
//! let graph = load_graph(Path::new("graph.yaml"))?;
//! let output = Generator::new(GeneratorConfig::default()).run(&graph);
//! print_diagnostics(&output.diagnostics);
//! write_units(Path::new("Generated"), &output.units, false)?;
//! ```
//!
//! Every pass is a pure function of the graph: no state survives between
//! passes, and two passes over an unchanged graph produce identical units.

pub mod annotation;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod dto;
pub mod facade;
pub mod generator;
pub mod graph;
pub mod logging;
pub mod propagation;

pub use config::GeneratorConfig;
pub use diagnostics::{has_errors, print_diagnostics, Diagnostic, DiagnosticCode, Severity};
pub use generator::{write_units, GeneratedUnit, Generator, PassOutput};
pub use graph::{load_graph, Declaration, DeclarationGraph, DeclarationSet, TypeDescriptor};
