use super::GeneratedUnit;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// What a call to [`write_units`] did (or, on a dry run, would do)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

/// Write generated units into `dir`, one file per output key.
///
/// Files whose content already matches are left untouched, so re-running an
/// unchanged pass modifies nothing. With `dry_run` nothing is written and the
/// report lists what would change.
pub fn write_units(dir: &Path, units: &[GeneratedUnit], dry_run: bool) -> anyhow::Result<WriteReport> {
    if !dry_run {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let mut report = WriteReport::default();
    for unit in units {
        let path = unit_path(dir, &unit.key)?;
        let current = fs::read_to_string(&path).ok();
        if current.as_deref() == Some(unit.source.as_str()) {
            tracing::debug!(path = %path.display(), "unchanged");
            report.unchanged.push(path);
            continue;
        }

        if dry_run {
            tracing::info!(path = %path.display(), "would write");
        } else {
            fs::write(&path, &unit.source)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote");
        }
        report.written.push(path);
    }
    Ok(report)
}

fn unit_path(dir: &Path, key: &str) -> anyhow::Result<PathBuf> {
    let is_plain_file_name = !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\']);
    if !is_plain_file_name {
        anyhow::bail!("Output key '{key}' is not a plain file name");
    }
    Ok(dir.join(key))
}
