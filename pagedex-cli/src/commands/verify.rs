//! Index content without writing output and report diagnostics.

use anyhow::{bail, Context, Result};
use pagedex_core::{Diagnostic, DiagnosticSeverity, PageIndexer};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct VerificationSummary<'a> {
    pages: usize,
    skipped: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    diagnostics: &'a [Diagnostic],
}

/// Run the indexer without writing and surface diagnostics.
pub fn verify_index(config_path: Option<&Path>, json: bool, strict: bool) -> Result<()> {
    let config = super::load_config(config_path)?;
    let indexer = PageIndexer::new(config).context("Invalid route configuration")?;
    let report = indexer
        .build()
        .context("Failed to index content for verification")?;

    let summary = VerificationSummary {
        pages: report.index.len(),
        skipped: report.skipped,
        errors: report.count(DiagnosticSeverity::Error),
        warnings: report.count(DiagnosticSeverity::Warning),
        infos: report.count(DiagnosticSeverity::Info),
        diagnostics: &report.diagnostics,
    };

    if json {
        let payload = serde_json::to_string_pretty(&summary)?;
        println!("{}", payload);
    } else {
        println!(
            "Verification complete: {} pages, {} skipped, {} errors, {} warnings, {} info",
            summary.pages, summary.skipped, summary.errors, summary.warnings, summary.infos
        );
        for diag in &report.diagnostics {
            let source = diag
                .source_path
                .as_deref()
                .map(|s| format!(" ({})", s))
                .unwrap_or_default();
            println!("- {:?} {}{}: {}", diag.severity, diag.code, source, diag.message);
        }
    }

    if strict && summary.errors > 0 {
        bail!("{} error diagnostics found", summary.errors);
    }

    Ok(())
}
