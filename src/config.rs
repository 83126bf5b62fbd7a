//! # Generator Configuration
//!
//! Settings for a generation run, read from a `facadegen.toml` file and then
//! overridden by environment variables.
//!
//! ## File
//!
//! ```toml
//! output_dir = "Generated"
//! trim_async_suffix = true
//! controller_usings = ["Microsoft.AspNetCore.Mvc", "System"]
//! dto_usings = ["System"]
//! ```
//!
//! Every key is optional. The file is taken from `--config` when given,
//! else from `facadegen.toml` next to the graph file, else defaults apply.
//!
//! ## Environment Variables
//!
//! - `FACADEGEN_OUTPUT_DIR` replaces `output_dir`
//! - `FACADEGEN_TRIM_ASYNC` replaces `trim_async_suffix` (`1`/`true`/`yes`/`on`)

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the graph snapshot
pub const CONFIG_FILE_NAME: &str = "facadegen.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory generated units are written into
    pub output_dir: PathBuf,
    /// Drop a trailing `Async` from default routes and envelope names
    pub trim_async_suffix: bool,
    /// `using` directives at the top of controller units
    pub controller_usings: Vec<String>,
    /// `using` directives at the top of dto and request-envelope units
    pub dto_usings: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output_dir: PathBuf::from("Generated"),
            trim_async_suffix: false,
            controller_usings: vec![
                "Microsoft.AspNetCore.Mvc".to_string(),
                "System".to_string(),
                "System.Threading.Tasks".to_string(),
            ],
            dto_usings: vec!["System".to_string()],
        }
    }
}

impl GeneratorConfig {
    /// Apply `FACADEGEN_*` environment overrides.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup("FACADEGEN_OUTPUT_DIR").filter(|v| !v.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("FACADEGEN_TRIM_ASYNC") {
            self.trim_async_suffix = parse_flag(&flag);
        }
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Load generator configuration from a TOML file.
///
/// Returns `Ok(None)` when the file does not exist and `Err` when it exists
/// but cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path).with_context(|| {
        format!("Failed to read generator config: {}", config_path.display())
    })?;

    let config: GeneratorConfig = toml::from_str(&contents).with_context(|| {
        format!("Failed to parse generator config: {}", config_path.display())
    })?;

    Ok(Some(config))
}

/// `facadegen.toml` in the graph file's directory, when present.
pub fn auto_detect_config_path(graph_path: &Path) -> Option<PathBuf> {
    let config_path = graph_path.parent()?.join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the graph
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, graph_path: &Path) -> Option<PathBuf> {
    match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => auto_detect_config_path(graph_path),
    }
}

/// Full configuration for a run: file (if any), then environment.
pub fn load_effective_config(
    explicit_path: Option<&Path>,
    graph_path: &Path,
) -> anyhow::Result<GeneratorConfig> {
    let config = match resolve_config_path(explicit_path, graph_path) {
        Some(path) => {
            let loaded = load_config(&path)?;
            if loaded.is_none() && explicit_path.is_some() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            tracing::debug!(path = %path.display(), "loaded generator config");
            loaded.unwrap_or_default()
        }
        None => GeneratorConfig::default(),
    };
    Ok(config.with_env())
}
