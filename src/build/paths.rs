//! Output path construction.
//!
//! Maps a source document path to the HTML file it produces inside the
//! output directory. Only the final path segment matters; source
//! subdirectories are flattened away.

use std::path::{Path, PathBuf};

use super::source::DOC_SUFFIX;

const HTML_SUFFIX: &str = ".html";

/// File name of the HTML page generated for a source document.
///
/// One trailing document suffix is removed before `.html` goes on:
/// "my-post.txt" -> "my-post.html". A file admitted under another name
/// keeps it whole: "notes.md" -> "notes.md.html".
pub fn html_file_name(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = name.strip_suffix(DOC_SUFFIX).unwrap_or(&name);
    format!("{stem}{HTML_SUFFIX}")
}

/// Where a document's page is written.
///
/// Every page lands directly in `output_dir`, so two documents sharing a
/// base name overwrite each other and the last one rendered wins.
pub fn output_path(source: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(html_file_name(source))
}
