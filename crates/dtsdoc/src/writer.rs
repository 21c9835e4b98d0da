//! Output paths and file writing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DocsError, Result};
use crate::generators::markdown::RenderedDoc;

/// Where the documentation for one source file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Source path re-rooted under the output directory, extension stripped.
    pub path: PathBuf,
    /// Directory receiving the Markdown pages. Equal to `path`, except for
    /// `index` sources which document their parent directory.
    pub dir: PathBuf,
}

impl OutputTarget {
    /// Maps `source` below `base` to the matching location below `out_dir`.
    ///
    /// `api/device/accelerometer.d.ts` becomes `<out>/device/accelerometer`,
    /// `api/device/index.d.ts` documents `<out>/device`. Sources outside
    /// `base` are placed directly under `out_dir`.
    pub fn for_source(source: &Path, base: &Path, out_dir: &Path) -> Self {
        let relative = source
            .strip_prefix(base)
            .ok()
            .filter(|relative| relative.file_name().is_some())
            .map(Path::to_path_buf)
            .or_else(|| source.file_name().map(PathBuf::from))
            .unwrap_or_default();

        let stem = relative
            .file_name()
            .map(|name| strip_source_extension(&name.to_string_lossy()).to_string())
            .unwrap_or_default();
        let path = out_dir.join(relative.with_file_name(&stem));
        let dir = if stem == "index" {
            path.parent().map(Path::to_path_buf).unwrap_or_else(|| out_dir.to_path_buf())
        } else {
            path.clone()
        };
        Self { path, dir }
    }

    /// Page path for an export.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.md"))
    }

    /// Path of the JSON dump, next to the page directory.
    pub fn json_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".json");
        PathBuf::from(path)
    }

    /// Directory created when the first write fails.
    pub fn creation_dir(&self) -> &Path {
        &self.dir
    }
}

/// Strips `.d.ts` or a single lowercase extension.
fn strip_source_extension(file_name: &str) -> &str {
    if let Some(stem) = file_name.strip_suffix(".d.ts") {
        return stem;
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_lowercase()) =>
        {
            stem
        }
        _ => file_name,
    }
}

/// Writes `content` to `path`, overwriting. Creates no directories.
pub fn write(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, content)
}

/// Writes every page rendered from one source file.
///
/// When a write fails, `target`'s directory is created recursively and the
/// whole batch is written once more; a second failure is returned.
pub fn write_documents(target: &OutputTarget, docs: &[RenderedDoc]) -> Result<usize> {
    with_retry(target.creation_dir(), || {
        for doc in docs {
            let path = target.document_path(&doc.name);
            write(&path, &doc.content).map_err(|error| DocsError::io(&path, error))?;
            debug!(path = %path.display(), "wrote page");
        }
        Ok(docs.len())
    })
}

/// Writes the JSON dump of one source file, with the same single retry.
pub fn write_json(target: &OutputTarget, content: &str) -> Result<()> {
    let path = target.json_path();
    let dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
    with_retry(&dir, || {
        write(&path, content).map_err(|error| DocsError::io(&path, error))
    })
}

fn with_retry<T>(dir: &Path, mut attempt: impl FnMut() -> Result<T>) -> Result<T> {
    match attempt() {
        Ok(value) => Ok(value),
        Err(error) => {
            debug!(dir = %dir.display(), %error, "creating output directory and retrying");
            fs::create_dir_all(dir).map_err(|error| DocsError::io(dir, error))?;
            attempt()
        }
    }
}
