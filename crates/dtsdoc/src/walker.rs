//! Recursive traversal of declaration source trees.

use std::ffi::OsStr;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::extractor::{DocsExtractor, ExtractOptions};
use crate::model::DocEntry;

/// Directory and file names that are never documented.
pub const DEFAULT_EXCLUDES: [&str; 9] = [
    "node_modules",
    "bin",
    "templates",
    "dist",
    "__tests__",
    "__mocks__",
    "_book",
    ".vscode",
    ".idea",
];

/// File extensions handed to the extractor. `.d.ts` files match `ts`.
pub const SOURCE_EXTENSIONS: [&str; 8] = ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Options controlling traversal.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Entry names skipped anywhere below the root.
    pub exclude: Vec<String>,
    /// Options forwarded to the extractor.
    pub extract: ExtractOptions,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDES.iter().map(|name| name.to_string()).collect(),
            extract: ExtractOptions::default(),
        }
    }
}

/// Visit every source file under `root` and pass its extracted entries to `callback`.
///
/// `root` may be a single file. Directories are visited depth-first in
/// file-name order. The first extraction, I/O or callback error stops the
/// traversal and is returned.
pub fn walk<F>(root: impl AsRef<Path>, options: &WalkOptions, callback: F) -> Result<()>
where
    F: FnMut(&Path, Vec<DocEntry>) -> Result<()>,
{
    let extractor = DocsExtractor::new(options.extract.clone());
    walk_with(
        root,
        &options.exclude,
        |path| extractor.extract_from_path(path),
        callback,
    )
}

/// Like [`walk`], with a caller-provided extraction step.
pub fn walk_with<E, F>(
    root: impl AsRef<Path>,
    exclude: &[String],
    mut extract: E,
    mut callback: F,
) -> Result<()>
where
    E: FnMut(&Path) -> Result<Vec<DocEntry>>,
    F: FnMut(&Path, Vec<DocEntry>) -> Result<()>,
{
    let walker = WalkDir::new(root.as_ref())
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry.file_name(), exclude));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_source_file(path) {
            debug!(path = %path.display(), "skipping non-source file");
            continue;
        }

        debug!(path = %path.display(), "extracting");
        let entries = extract(path)?;
        callback(path, entries)?;
    }
    Ok(())
}

fn is_excluded(name: &OsStr, exclude: &[String]) -> bool {
    exclude.iter().any(|excluded| OsStr::new(excluded) == name)
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocsError;
    use crate::model::EntryKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn defaults() -> Vec<String> {
        WalkOptions::default().exclude
    }

    #[test]
    fn never_descends_into_excluded_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("node_modules/pkg")).unwrap();
        fs::write(temp.path().join("node_modules/pkg/index.d.ts"), "").unwrap();
        fs::write(temp.path().join("device.d.ts"), "").unwrap();

        let mut extracted = Vec::new();
        walk_with(
            temp.path(),
            &defaults(),
            |path| {
                extracted.push(path.to_path_buf());
                Ok(Vec::new())
            },
            |_, _| Ok(()),
        )
        .unwrap();

        assert_eq!(extracted, vec![temp.path().join("device.d.ts")]);
    }

    #[test]
    fn visits_files_in_sorted_order_and_skips_other_extensions() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("b")).unwrap();
        fs::write(temp.path().join("b/z.d.ts"), "").unwrap();
        fs::write(temp.path().join("c.ts"), "").unwrap();
        fs::write(temp.path().join("a.d.ts"), "").unwrap();
        fs::write(temp.path().join("README.md"), "").unwrap();

        let mut visited: Vec<PathBuf> = Vec::new();
        walk_with(
            temp.path(),
            &defaults(),
            |_| Ok(Vec::new()),
            |path, _| {
                visited.push(path.strip_prefix(temp.path()).unwrap().to_path_buf());
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(
            visited,
            vec![
                PathBuf::from("a.d.ts"),
                PathBuf::from("b/z.d.ts"),
                PathBuf::from("c.ts")
            ]
        );
    }

    #[test]
    fn single_file_root_is_extracted() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("vibrate.d.ts");
        fs::write(&file, "declare namespace Taro { function vibrateShort(): void }").unwrap();

        let mut roots = Vec::new();
        walk(&file, &WalkOptions::default(), |path, entries| {
            assert_eq!(path, file.as_path());
            roots.extend(entries);
            Ok(())
        })
        .unwrap();

        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].kind, EntryKind::Namespace);
    }

    #[test]
    fn extraction_failure_aborts_traversal() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.d.ts"), "declare namespace {").unwrap();
        fs::write(temp.path().join("b.d.ts"), "declare function ok(): void").unwrap();

        let mut calls = 0;
        let result = walk(temp.path(), &WalkOptions::default(), |_, _| {
            calls += 1;
            Ok(())
        });

        assert!(matches!(result, Err(DocsError::Parse { .. })));
        assert_eq!(calls, 0);
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let temp = TempDir::new().unwrap();
        let result = walk(temp.path().join("absent"), &WalkOptions::default(), |_, _| Ok(()));
        assert!(matches!(result, Err(DocsError::Io { .. })));
    }
}
