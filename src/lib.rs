//! Turns plain-text posts into static HTML pages.
//!
//! A document is split at its first line break: the first line becomes
//! the page title and the rest, trimmed, becomes the body. Both are bound
//! into a single Tera template and written as one `.html` file per
//! document under the output directory.
//!
//! The pipeline lives in [`build`]: discovery ([`build::source`]),
//! parsing ([`Page`]), rendering ([`Renderer`]), and orchestration
//! ([`Builder`]). Callers observe per-document outcomes through
//! [`BuildProgress`] and get a [`BuildReport`] back; wall-clock timing
//! and output measurement stay with the caller.

pub mod build;
pub mod config;

pub use build::{
    BuildError, BuildProgress, BuildReport, Builder, DocumentFailure, NoopProgress, Page,
    RenderError, Renderer, SharedProgress,
};
pub use config::{ConfigError, SiteConfig};
