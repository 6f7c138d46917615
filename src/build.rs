mod builder;
mod page;
mod paths;
mod progress;
mod render;
pub mod source;

pub use builder::{BuildError, BuildReport, Builder, DocumentFailure};
pub use page::Page;
pub use paths::{html_file_name, output_path};
pub use progress::{BuildProgress, NoopProgress, SharedProgress};
pub use render::{RenderError, Renderer};
