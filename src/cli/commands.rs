use crate::config::load_effective_config;
use crate::diagnostics::{has_errors, print_diagnostics, Diagnostic};
use crate::facade::Binding;
use crate::generator::{write_units, Generator, Resolved};
use crate::graph::load_graph;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command-line interface for facadegen
///
/// Generates ASP.NET controllers, request records and DTO projections from
/// an annotated declaration graph snapshot.
#[derive(Parser)]
#[command(name = "facadegen")]
#[command(version, about = "Facade and DTO source generator", long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate source files from a declaration graph
    Generate {
        /// Path to the declaration graph snapshot (YAML or JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Output directory (overrides config and FACADEGEN_OUTPUT_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to facadegen.toml
        /// If not provided, will auto-detect alongside the graph
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Perform a dry run: show what would change without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Run a synthesis pass and report diagnostics only
    Check {
        /// Path to the declaration graph snapshot (YAML or JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Path to facadegen.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Exit with a failure status if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Only show errors (hide warnings)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Print the resolved facade and dto descriptors
    Inspect {
        /// Path to the declaration graph snapshot (YAML or JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Path to facadegen.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Run a parsed command line.
///
/// # Errors
///
/// Returns an error if the graph or config cannot be loaded, or generated
/// files cannot be written. Diagnostics never produce `Err`; they decide the
/// exit code instead.
pub fn run_cli(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Generate {
            graph,
            output,
            config,
            dry_run,
        } => {
            let generator = generator_for(graph, config.as_deref())?;
            let declarations = load_graph(graph)?;
            let pass = generator.run(&declarations);
            print_diagnostics(&pass.diagnostics);

            let out_dir = output
                .clone()
                .unwrap_or_else(|| generator.config().output_dir.clone());
            let report = write_units(&out_dir, &pass.units, *dry_run)?;
            let verb = if *dry_run { "Would write" } else { "Wrote" };
            println!(
                "✅ {} {} file(s) to {}, {} unchanged",
                verb,
                report.written.len(),
                out_dir.display(),
                report.unchanged.len()
            );
            for path in &report.written {
                println!("   {}", path.display());
            }

            Ok(exit_code(!pass.has_errors()))
        }
        Commands::Check {
            graph,
            config,
            fail_on_error,
            errors_only,
        } => {
            let generator = generator_for(graph, config.as_deref())?;
            let declarations = load_graph(graph)?;
            let pass = generator.run(&declarations);

            let shown: Vec<Diagnostic> = if *errors_only {
                pass.diagnostics
                    .iter()
                    .filter(|d| d.is_error())
                    .cloned()
                    .collect()
            } else {
                pass.diagnostics.clone()
            };
            print_diagnostics(&shown);

            Ok(exit_code(!(*fail_on_error && has_errors(&pass.diagnostics))))
        }
        Commands::Inspect { graph, config } => {
            let generator = generator_for(graph, config.as_deref())?;
            let declarations = load_graph(graph)?;
            let resolved = generator.resolve(&declarations);
            print!("{}", format_resolved(&resolved));
            print_diagnostics(&resolved.diagnostics);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn generator_for(graph: &Path, config: Option<&Path>) -> anyhow::Result<Generator> {
    let config = load_effective_config(config, graph)?;
    Ok(Generator::new(config))
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Human-readable listing of resolved descriptors
pub fn format_resolved(resolved: &Resolved) -> String {
    let mut out = format!("📋 Facades: {}\n", resolved.facades.len());
    for facade in &resolved.facades {
        out.push_str(&format!(
            "   {} → {}.{} (service {})\n",
            facade.source,
            facade.controller_namespace,
            facade.controller_class(),
            facade.service_type
        ));
        for op in &facade.operations {
            out.push_str(&format!(
                "      {} {} → {}\n",
                op.verb, op.route.template, op.method_name
            ));
            for p in &op.parameters {
                let source = match (p.binding, op.verb.is_get()) {
                    (Binding::RouteBound, _) => "route",
                    (Binding::Free, true) => "query",
                    (Binding::Free, false) => "body",
                };
                out.push_str(&format!(
                    "         {} {} ({})\n",
                    p.parameter.ty, p.parameter.name, source
                ));
            }
            if let Some(envelope) = &op.request_envelope {
                out.push_str(&format!(
                    "         body: {}.{}\n",
                    facade.dto_namespace, envelope.type_name
                ));
            }
        }
    }

    out.push_str(&format!("📋 Dtos: {}\n", resolved.dtos.len()));
    for dto in &resolved.dtos {
        out.push_str(&format!("   {} ← {}\n", dto.source, dto.entity_type));
        if !dto.ignored_properties.is_empty() {
            let names: Vec<_> = dto.ignored_properties.iter().map(String::as_str).collect();
            out.push_str(&format!("      ignored: {}\n", names.join(", ")));
        }
        if !dto.explicit_member_names.is_empty() {
            let names: Vec<_> = dto.explicit_member_names.iter().map(String::as_str).collect();
            out.push_str(&format!("      explicit: {}\n", names.join(", ")));
        }
    }
    out
}
