//! End-to-end generation: walk, merge, render, write.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DocsError, Result};
use crate::extractor::ExtractOptions;
use crate::generators::markdown::{render_markdown, RenderedDoc};
use crate::merge::merge;
use crate::model::DocEntry;
use crate::platform::{default_platforms, Platform};
use crate::walker::{walk, WalkOptions};
use crate::writer::{write_documents, OutputTarget};

/// Output flavour of a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One Markdown page per export.
    #[default]
    Markdown,
    /// One JSON dump of the merged tree per source file.
    Json,
}

/// Inputs of [`generate`].
#[derive(Debug, Clone)]
pub struct DocsOptions {
    /// Directory that output paths are computed relative to.
    pub base: PathBuf,
    /// Root of the generated documentation tree.
    pub out_dir: PathBuf,
    /// Files or directories to document.
    pub paths: Vec<PathBuf>,
    /// Entry names skipped during traversal.
    pub exclude: Vec<String>,
    /// Support-matrix columns.
    pub platforms: Vec<Platform>,
    /// Output flavour.
    pub format: OutputFormat,
    /// Document `@internal` symbols too.
    pub include_internal: bool,
}

impl DocsOptions {
    /// Options with the default exclusions, platforms and Markdown output.
    pub fn new(base: impl Into<PathBuf>, out_dir: impl Into<PathBuf>, paths: Vec<PathBuf>) -> Self {
        Self {
            base: base.into(),
            out_dir: out_dir.into(),
            paths,
            exclude: WalkOptions::default().exclude,
            platforms: default_platforms(),
            format: OutputFormat::default(),
            include_internal: false,
        }
    }
}

/// Counters describing a finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Source files handed to the extractor.
    pub files_scanned: usize,
    /// Source files that produced at least one page (or JSON dump).
    pub files_documented: usize,
    /// Markdown pages or JSON files written.
    pub documents_written: usize,
}

/// Generate documentation for every path in `options`.
///
/// Each source file is merged, rendered and written on its own, in traversal
/// order. Two files mapping to the same directory (`device.d.ts` and
/// `device/index.d.ts`) both write into it; a page name produced by both is
/// overwritten by the later file. The first error aborts the run.
pub fn generate(options: &DocsOptions) -> Result<GenerateReport> {
    let base = absolute(&options.base)?;
    let out_dir = absolute(&options.out_dir)?;
    let walk_options = WalkOptions {
        exclude: options.exclude.clone(),
        extract: ExtractOptions {
            include_internal: options.include_internal,
        },
    };

    let mut report = GenerateReport::default();
    for root in &options.paths {
        let root = absolute(root)?;
        walk(&root, &walk_options, |path, entries| {
            report.files_scanned += 1;
            if entries.is_empty() {
                debug!(path = %path.display(), "no declarations");
                return Ok(());
            }
            let target = OutputTarget::for_source(path, &base, &out_dir);
            let written = document_file(&target, merge(entries), options)?;
            if written > 0 {
                info!(
                    source = %path.display(),
                    dir = %target.dir.display(),
                    documents = written,
                    "wrote documentation"
                );
                report.files_documented += 1;
                report.documents_written += written;
            }
            Ok(())
        })?;
    }

    Ok(report)
}

/// Renders and writes one merged source file, returning the number of files written.
fn document_file(target: &OutputTarget, merged: Vec<DocEntry>, options: &DocsOptions) -> Result<usize> {
    match options.format {
        OutputFormat::Markdown => {
            let docs: Vec<RenderedDoc> = merged
                .iter()
                .flat_map(|root| render_markdown(root, &options.platforms))
                .collect();
            if docs.is_empty() {
                debug!(dir = %target.dir.display(), "nothing exported");
                return Ok(0);
            }
            write_documents(target, &docs)
        }
        OutputFormat::Json => write_json_dump(target, &merged),
    }
}

#[cfg(feature = "json")]
fn write_json_dump(target: &OutputTarget, merged: &[DocEntry]) -> Result<usize> {
    let content = crate::generators::json::render_json(merged)?;
    crate::writer::write_json(target, &content)?;
    Ok(1)
}

#[cfg(not(feature = "json"))]
fn write_json_dump(_target: &OutputTarget, _merged: &[DocEntry]) -> Result<usize> {
    Err(DocsError::Other {
        message: "JSON output requires the `json` feature".to_string(),
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|error| DocsError::io(path, error))
}
