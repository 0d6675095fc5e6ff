//! Recursive discovery of catalog files.

use crate::error::{PoCsvError, ensure_exists};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default catalog extension.
pub const DEFAULT_EXTENSION: &str = "po";

/// Find every file under `base` whose name ends with `.<extension>`.
///
/// Paths are returned in traversal order. Sibling entries are visited by file
/// name so the order is stable for a given tree. No matches is not an error.
pub fn find_files(base: &Path, extension: &str) -> Result<Vec<PathBuf>, PoCsvError> {
    ensure_exists(base)?;

    let suffix = format!(".{}", extension);
    let mut paths = Vec::new();

    for entry in WalkDir::new(base).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&suffix));

        if matches {
            paths.push(entry.into_path());
        }
    }

    tracing::debug!(
        "Found {} '.{}' file(s) under {}",
        paths.len(),
        extension,
        base.display()
    );

    Ok(paths)
}
