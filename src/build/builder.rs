use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::SiteConfig;

use super::page::Page;
use super::paths;
use super::progress::{NoopProgress, SharedProgress};
use super::render::{RenderError, Renderer};
use super::source::{self, SourceError};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("failed to read document {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a build produced.
///
/// Timing and output sizing belong to the caller; the report only counts
/// what the pipeline itself did.
#[derive(Debug)]
pub struct BuildReport {
    /// Documents converted into pages
    pub pages: usize,
    /// Documents that failed, in discovery order
    pub failures: Vec<DocumentFailure>,
    /// Where the pages were written
    pub output_dir: PathBuf,
}

/// One document that could not be converted.
#[derive(Debug)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: BuildError,
}

pub struct Builder {
    config: SiteConfig,
    progress: SharedProgress,
}

impl Builder {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            progress: Arc::new(NoopProgress),
        }
    }

    /// Replace the default no-op progress sink.
    pub fn with_progress(mut self, progress: SharedProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Build a single document, echoing the rendered page to `echo`
    /// before persisting it.
    ///
    /// The file is taken as-is, whatever its name. The first failure
    /// aborts the invocation; a one-document run has no partial success
    /// worth reporting.
    pub fn build_file(
        &self,
        file: &Path,
        echo: &mut dyn Write,
    ) -> Result<BuildReport, BuildError> {
        if !file.exists() {
            return Err(SourceError::PathNotFound(file.to_path_buf()).into());
        }

        let output_dir = self.ensure_output_dir()?;
        let renderer = Renderer::new(&self.config.template);

        self.progress.on_build_start(1);
        self.progress.on_document_start(file);

        let raw = std::fs::read(file).map_err(|e| BuildError::Read {
            path: file.to_path_buf(),
            source: e,
        })?;
        let page = Page::parse(&raw);

        // Echo to the caller's stream first, then write the page
        renderer.render_to_writer(&page, echo)?;

        let dest = paths::output_path(file, &output_dir);
        renderer.render_to_file(&page, &dest)?;
        debug!("Converted {} -> {}", file.display(), dest.display());

        self.progress.on_document_converted(file, &dest);
        self.progress.on_build_complete(1, 0);

        Ok(BuildReport {
            pages: 1,
            failures: Vec::new(),
            output_dir,
        })
    }

    /// Build every matching document under `dir`.
    ///
    /// One bad document does not stop the rest: failures are recorded in
    /// the report and the loop moves on. A walk error that yielded
    /// nothing is fatal; with a partial yield the error joins the report
    /// as a failure against the root and whatever was found is still
    /// converted.
    pub fn build_dir(&self, dir: &Path) -> Result<BuildReport, BuildError> {
        // Build pipeline:
        // 1. Ensure the output directory
        // 2. Collect documents from the source tree
        // 3. Convert each one, recording failures instead of stopping
        let output_dir = self.ensure_output_dir()?;
        let renderer = Renderer::new(&self.config.template);

        let mut documents = Vec::new();
        let mut failures = Vec::new();
        if let Err(err) = source::collect_documents(dir, &mut documents) {
            if documents.is_empty() {
                return Err(err.into());
            }
            warn!(
                "Walk of {} ended early ({}); converting the {} document(s) found",
                dir.display(),
                err,
                documents.len()
            );
            failures.push(DocumentFailure {
                path: dir.to_path_buf(),
                error: err.into(),
            });
        }

        info!("Found {} document(s) under {}", documents.len(), dir.display());
        self.progress.on_build_start(documents.len());

        let mut pages = 0;
        for document in &documents {
            self.progress.on_document_start(document);

            match self.convert(&renderer, document, &output_dir) {
                Ok(dest) => {
                    self.progress.on_document_converted(document, &dest);
                    pages += 1;
                }
                Err(error) => {
                    warn!("Failed to convert {}: {}", document.display(), error);
                    self.progress.on_document_failed(document, &error);
                    failures.push(DocumentFailure {
                        path: document.clone(),
                        error,
                    });
                }
            }
        }

        info!("Wrote {} page(s) to {}", pages, output_dir.display());
        self.progress.on_build_complete(pages, failures.len());

        Ok(BuildReport {
            pages,
            failures,
            output_dir,
        })
    }

    /// Read, parse, and render one document into the output directory.
    fn convert(
        &self,
        renderer: &Renderer,
        document: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, BuildError> {
        let raw = std::fs::read(document).map_err(|e| BuildError::Read {
            path: document.to_path_buf(),
            source: e,
        })?;
        let page = Page::parse(&raw);

        let dest = paths::output_path(document, output_dir);
        renderer.render_to_file(&page, &dest)?;

        debug!("Converted {} -> {}", document.display(), dest.display());
        Ok(dest)
    }

    /// Create the output directory if it is not already there.
    ///
    /// Runs before any document is touched so a doomed build fails here
    /// instead of partway through.
    fn ensure_output_dir(&self) -> Result<PathBuf, BuildError> {
        let output_dir = self.config.output.clone();
        std::fs::create_dir_all(&output_dir).map_err(|e| BuildError::OutputDir {
            path: output_dir.clone(),
            source: e,
        })?;
        Ok(output_dir)
    }
}
