//! The generate command.

use crate::config::DocsConfig;
use crate::error::{Result, ResultExt};
use crate::ui;
use dtsdoc::{generate, GenerateReport, OutputFormat};

/// Generate documentation as described by `config`.
///
/// Every input path must exist. Status lines are suppressed when `quiet`.
pub fn execute(config: &DocsConfig, quiet: bool) -> Result<GenerateReport> {
    for path in &config.paths {
        path.metadata().with_path(path)?;
    }

    if !quiet {
        ui::info(&format!(
            "Documenting {} into {}",
            join_paths(config),
            config.out_dir.display()
        ));
    }

    let report = generate(&config.to_options())?;
    tracing::debug!(?report, "generation finished");

    if !quiet {
        if report.documents_written == 0 {
            ui::warning(&format!(
                "No documentation generated from {} source files",
                report.files_scanned
            ));
        } else {
            let unit = match config.format {
                OutputFormat::Markdown => "pages",
                OutputFormat::Json => "JSON files",
            };
            ui::success(&format!(
                "Wrote {} {} from {} of {} source files",
                report.documents_written, unit, report.files_documented, report.files_scanned
            ));
        }
    }
    Ok(report)
}

fn join_paths(config: &DocsConfig) -> String {
    config
        .paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
