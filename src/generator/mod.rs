//! # Generator Module
//!
//! Runs one synthesis pass over a declaration graph and produces generated
//! source units plus diagnostics.
//!
//! ## Pipeline
//!
//! ```text
//! DeclarationGraph → discover → resolve_{facade,dto} → synthesize_{controller,dto} → PassOutput
//! ```
//!
//! Each discovered declaration is processed into a private buffer (units and
//! diagnostics). The buffer is committed to the pass output only once the
//! declaration is complete, so a declaration that fails to render contributes
//! a `synthesis_failed` diagnostic and nothing else. Facades are processed
//! before dtos, each in discovery order.
//!
//! Output keys are unique within a pass. The first declaration to produce a
//! key owns it; a later declaration producing any of the same keys commits
//! none of its units and reports `duplicate_output_key`.
//!
//! A pass holds no state between runs: running it twice over the same graph
//! produces identical output.
//!
//! ## Output Keys
//!
//! | Unit                  | Key                               |
//! |-----------------------|-----------------------------------|
//! | Controller            | `<ControllerName>Controller.g.cs` |
//! | Request envelopes     | `<ControllerName>Requests.g.cs`   |
//! | Dto                   | `<DtoName>.g.cs`                  |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use facadegen::{load_graph, Generator, GeneratorConfig};
//!
//! let graph = load_graph(Path::new("graph.yaml"))?;
//! let output = Generator::new(GeneratorConfig::default()).run(&graph);
//! for unit in &output.units {
//!     println!("{}", unit.key);
//! }
//! ```

pub mod templates;
mod write;


pub use write::*;

use crate::config::GeneratorConfig;
use crate::diagnostics::{has_errors, Diagnostic, DiagnosticCode, DiagnosticReporter};
use crate::discovery::discover;
use crate::dto::{resolve_dto, synthesize_dto, DtoDescriptor};
use crate::facade::{resolve_facade, synthesize_controller, FacadeDescriptor};
use crate::graph::{Declaration, DeclarationGraph};
use serde::Serialize;
use std::collections::HashMap;

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    /// Output key, used as the file name
    pub key: String,
    pub source: String,
}

impl GeneratedUnit {
    pub fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        GeneratedUnit {
            key: key.into(),
            source: source.into(),
        }
    }
}

/// Result of one synthesis pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOutput {
    pub units: Vec<GeneratedUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PassOutput {
    pub fn has_errors(&self) -> bool {
        has_errors(&self.diagnostics)
    }

    pub fn unit(&self, key: &str) -> Option<&GeneratedUnit> {
        self.units.iter().find(|u| u.key == key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.key.as_str()).collect()
    }
}

/// Resolved descriptors for a graph, before synthesis
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub facades: Vec<FacadeDescriptor>,
    pub dtos: Vec<DtoDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Work buffered for one declaration until it completes
#[derive(Default)]
struct Pending {
    units: Vec<GeneratedUnit>,
    reporter: DiagnosticReporter,
}

impl Pending {
    fn fail(&mut self, declaration: &Declaration, err: anyhow::Error) {
        self.units.clear();
        self.reporter.report(
            Diagnostic::new(
                DiagnosticCode::SynthesisFailed,
                &declaration.identity,
                format!("Failed to generate source: {err:#}"),
            )
            .with_suggestion("Check the declaration's annotations for unsupported values"),
        );
    }
}

/// Synthesis pass driver
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Generator { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Resolve every discovered declaration without rendering anything.
    pub fn resolve<G: DeclarationGraph + ?Sized>(&self, graph: &G) -> Resolved {
        let found = discover(graph);
        let mut reporter = DiagnosticReporter::new();
        let facades = found
            .facades
            .iter()
            .filter_map(|decl| resolve_facade(graph, decl, &self.config, &mut reporter))
            .collect();
        let dtos = found
            .dtos
            .iter()
            .filter_map(|decl| resolve_dto(graph, decl, &mut reporter))
            .collect();
        Resolved {
            facades,
            dtos,
            diagnostics: reporter.into_diagnostics(),
        }
    }

    /// Run a full pass: discover, resolve, synthesize.
    pub fn run<G: DeclarationGraph + ?Sized>(&self, graph: &G) -> PassOutput {
        let found = discover(graph);
        let mut output = PassOutput::default();
        let mut owners = HashMap::new();

        for facade in &found.facades {
            let pending = self.process_facade(graph, facade);
            commit(&mut output, &mut owners, facade, pending);
        }
        for dto in &found.dtos {
            let pending = self.process_dto(graph, dto);
            commit(&mut output, &mut owners, dto, pending);
        }

        tracing::info!(
            units = output.units.len(),
            diagnostics = output.diagnostics.len(),
            "synthesis pass complete"
        );
        output
    }

    fn process_facade<G: DeclarationGraph + ?Sized>(
        &self,
        graph: &G,
        facade: &Declaration,
    ) -> Pending {
        let mut pending = Pending::default();
        let Some(descriptor) = resolve_facade(graph, facade, &self.config, &mut pending.reporter)
        else {
            return pending;
        };
        match synthesize_controller(&descriptor, &self.config) {
            Ok(units) => pending.units = units,
            Err(err) => pending.fail(facade, err),
        }
        pending
    }

    fn process_dto<G: DeclarationGraph + ?Sized>(&self, graph: &G, dto: &Declaration) -> Pending {
        let mut pending = Pending::default();
        let Some(descriptor) = resolve_dto(graph, dto, &mut pending.reporter) else {
            return pending;
        };
        match synthesize_dto(graph, &descriptor, &self.config) {
            Ok(unit) => pending.units.push(unit),
            Err(err) => pending.fail(dto, err),
        }
        pending
    }
}

/// Merge one declaration's buffered work into the pass output.
///
/// Keys are checked for the whole declaration before any unit is taken: if
/// one collides with a unit already committed, none of this declaration's
/// units are kept and a `duplicate_output_key` error is reported instead.
fn commit(
    output: &mut PassOutput,
    owners: &mut HashMap<String, String>,
    declaration: &Declaration,
    mut pending: Pending,
) {
    let collision = pending
        .units
        .iter()
        .find_map(|unit| owners.get(&unit.key).map(|owner| (unit.key.clone(), owner.clone())));

    if let Some((key, owner)) = collision {
        pending.units.clear();
        pending.reporter.report(
            Diagnostic::new(
                DiagnosticCode::DuplicateOutputKey,
                &declaration.identity,
                format!("Output key '{key}' is already produced by '{owner}'"),
            )
            .with_suggestion("Give one of the declarations a distinct controller or class name"),
        );
    }

    for unit in pending.units {
        tracing::debug!(key = %unit.key, declaration = %declaration.identity, "generated unit");
        owners.insert(unit.key.clone(), declaration.identity.clone());
        output.units.push(unit);
    }
    output
        .diagnostics
        .extend(pending.reporter.into_diagnostics());
}
