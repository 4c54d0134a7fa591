//! Build command implementation.

use anyhow::{Context, Result};
use pagedex_core::{write_index, Config, DiagnosticSeverity, IndexReport, PageIndexer};
use std::path::{Path, PathBuf};

/// Command-line overrides applied on top of the loaded config
#[derive(Debug, Default, Clone)]
pub struct BuildOverrides {
    pub content: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

/// Build the search index and write it to the configured output path
pub fn build_index(config_path: Option<&Path>, overrides: BuildOverrides) -> Result<()> {
    let config = super::load_config(config_path)?;
    let config = apply_overrides(config, overrides)?;
    build_with_config(config).map(|_| ())
}

/// Build and write the index from an already loaded config, returning the report.
pub fn build_with_config(config: Config) -> Result<IndexReport> {
    let output = config.output_path();
    let pretty = config.pretty;

    tracing::info!("Indexing {:?}", config.content_dir());

    let indexer = PageIndexer::new(config).context("Invalid route configuration")?;
    let report = indexer.build().context("Failed to build index")?;

    write_index(&report.index, &output, pretty).context("Failed to write index")?;

    let errors = report.count(DiagnosticSeverity::Error);
    let warnings = report.count(DiagnosticSeverity::Warning);

    tracing::info!("✓ Indexed {} pages", report.index.len());
    if errors + warnings > 0 {
        tracing::warn!(
            "{} errors, {} warnings (run `pagedex verify` for details)",
            errors,
            warnings
        );
    }
    tracing::info!("✓ Output written to {:?}", output);

    Ok(report)
}

fn apply_overrides(mut config: Config, overrides: BuildOverrides) -> Result<Config> {
    if overrides.content.is_some() || overrides.output.is_some() {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        if let Some(content) = overrides.content {
            config.paths.content = cwd.join(content);
        }
        if let Some(output) = overrides.output {
            config.paths.output = cwd.join(output);
        }
    }
    config.pretty |= overrides.pretty;
    Ok(config)
}
