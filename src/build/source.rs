use std::path::{Path, PathBuf};

/// File name suffix that marks a file as a source document.
///
/// Matched byte-for-byte against the end of the file name, so `notes.TXT`
/// and `archive.txt.bak` do not qualify.
pub const DOC_SUFFIX: &str = ".txt";

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("source path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Discovery
// =============================================================================

/// Collect the source documents reachable from `root` into `found`.
///
/// A file root is pushed as-is, whatever its name; only an explicit
/// directory is filtered by [`DOC_SUFFIX`]. Directories are walked
/// recursively with entries visited in lexicographic order, so repeated
/// runs over the same tree discover documents in the same order.
///
/// Paths already pushed stay in `found` when a nested directory fails to
/// read partway through the walk, letting callers keep the partial yield
/// alongside the error.
pub fn collect_documents(root: &Path, found: &mut Vec<PathBuf>) -> Result<(), SourceError> {
    if !root.exists() {
        return Err(SourceError::PathNotFound(root.to_path_buf()));
    }

    if root.is_dir() {
        walk_directory(root, found)
    } else {
        found.push(root.to_path_buf());
        Ok(())
    }
}

/// Collect documents from `root`, discarding any partial yield on error.
pub fn discover(root: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let mut found = Vec::new();
    collect_documents(root, &mut found)?;
    Ok(found)
}

/// Recursively walk a directory and collect matching documents.
fn walk_directory(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), SourceError> {
    let entries = std::fs::read_dir(dir).map_err(|e| SourceError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut entries = entries
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SourceError::ReadEntry {
            path: dir.to_path_buf(),
            source: e,
        })?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| SourceError::ReadEntry {
            path: path.clone(),
            source: e,
        })?;

        if file_type.is_dir() {
            walk_directory(&path, found)?;
        } else if is_document(&path) {
            // Symlinks count as files here; a dangling one surfaces as a
            // read error later rather than being silently dropped.
            found.push(path);
        }
    }

    Ok(())
}

/// Whether a file name ends with the document suffix.
fn is_document(path: &Path) -> bool {
    match path.file_name() {
        Some(name) => name.to_string_lossy().ends_with(DOC_SUFFIX),
        None => false,
    }
}
