//! Handler for the single `testdoc` invocation.

use super::args::Cli;
use crate::config::load_config;
use crate::pipeline::{run_directories, Pipeline, RunReport};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Build the run report described by `cli`.
pub fn build_report(cli: &Cli) -> Result<RunReport> {
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let pipeline = Pipeline::new(config);

    let mut report = run_directories(&pipeline, &cli.sources, &cli.reports).with_context(|| {
        format!(
            "Failed to read result documents from {}",
            cli.reports.display()
        )
    })?;

    if let Some(method) = &cli.method {
        report.retain_method(method);
        if report.tables.is_empty() {
            tracing::warn!("No test cases attributed to method {method}");
        }
    }

    for diagnostic in &report.diagnostics {
        tracing::info!("{diagnostic}");
    }
    Ok(report)
}

/// Run the pipeline and write the JSON report.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let report = build_report(cli)?;
    let json = report.to_json().context("Failed to serialize report")?;

    match &cli.output {
        Some(path) => write_output(path, &json)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write report to stdout")?;
        }
    }

    if !report.diagnostics.is_empty() {
        tracing::warn!(
            "{} diagnostics recorded; see the report for details",
            report.diagnostics.len()
        );
    }
    Ok(())
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, json)
        .with_context(|| format!("Failed to write report to: {}", path.display()))
}
