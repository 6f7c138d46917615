//! Progress-callback trait for per-document build events.

use std::path::Path;
use std::sync::Arc;

use super::builder::BuildError;

/// Observes the pipeline as it processes documents.
///
/// All methods have default no-op bodies, so implementations only
/// override the events they care about. The pipeline reports through
/// this trait instead of printing; it owns no console and no global
/// state.
pub trait BuildProgress: Send + Sync {
    /// Called once after discovery, before any document is processed.
    fn on_build_start(&self, total: usize) {
        let _ = total;
    }

    /// Called just before a document is read.
    fn on_document_start(&self, source: &Path) {
        let _ = source;
    }

    /// Called when a document's page has been written.
    fn on_document_converted(&self, source: &Path, output: &Path) {
        let _ = (source, output);
    }

    /// Called when a document fails and the build moves on to the next
    /// one. A single-file build returns the error instead of reporting
    /// it here.
    fn on_document_failed(&self, source: &Path, error: &BuildError) {
        let _ = (source, error);
    }

    /// Called once after every document has been attempted.
    fn on_build_complete(&self, converted: usize, failed: usize) {
        let _ = (converted, failed);
    }
}

/// Discards every event; the default sink.
pub struct NoopProgress;

impl BuildProgress for NoopProgress {}

/// How the pipeline stores its sink.
pub type SharedProgress = Arc<dyn BuildProgress>;
