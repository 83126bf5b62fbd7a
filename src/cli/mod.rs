//! # CLI Module
//!
//! Command-line front end for the generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! facadegen generate --graph graph.yaml --output Generated
//! ```
//!
//! Options:
//! - `--graph <FILE>` - Declaration graph snapshot (required)
//! - `--output <DIR>` - Output directory (default: `output_dir` from config)
//! - `--config <FILE>` - Config file (default: `facadegen.toml` next to the graph)
//! - `--dry-run` - Report what would change without writing
//!
//! Exits non-zero when the pass produced any error diagnostic. Units for
//! unaffected declarations are still written.
//!
//! ### `check`
//!
//! ```bash
//! facadegen check --graph graph.yaml --fail-on-error
//! ```
//!
//! ### `inspect`
//!
//! ```bash
//! facadegen inspect --graph graph.yaml
//! ```

mod commands;


pub use commands::{format_resolved, run_cli, Cli, Commands};
