use std::io::Write;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use super::page::Page;

/// Name the template is registered under inside Tera.
///
/// The `.html` suffix matters: for a template registered from a string,
/// Tera keys its default autoescaping off this name, and escaping the
/// bound values is what keeps raw text from smuggling markup into a page.
const PAGE_TEMPLATE: &str = "page.html";

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("failed to load template {path}: {source}")]
    TemplateLoad { path: PathBuf, source: tera::Error },

    #[error("failed to render template {path}: {source}")]
    Render { path: PathBuf, source: tera::Error },

    #[error("failed to write rendered page to {target}: {source}")]
    Write {
        target: String,
        source: std::io::Error,
    },
}

/// The page renderer, wrapping Tera.
///
/// Holds only the template path. The template file is parsed again on
/// every render call, so an edit to it takes effect from the next
/// document onward within a single run.
pub struct Renderer {
    template_path: PathBuf,
}

impl Renderer {
    /// Create a renderer for the given template file.
    ///
    /// The file is not touched here; a missing or broken template
    /// surfaces as [`RenderError::TemplateLoad`] when rendering.
    pub fn new(template_path: &Path) -> Self {
        Self {
            template_path: template_path.to_path_buf(),
        }
    }

    /// Parse the template from disk into a fresh Tera instance.
    ///
    /// The content goes in as a raw template. A template added by path
    /// has Tera decide escaping from the on-disk file name instead of
    /// the registered one, and a `.tmpl` name would leave it off.
    fn load(&self) -> Result<Tera, RenderError> {
        let source =
            std::fs::read_to_string(&self.template_path).map_err(|e| RenderError::TemplateLoad {
                path: self.template_path.clone(),
                source: tera::Error::chain("failed to read template file", e),
            })?;

        let mut tera = Tera::default();
        tera.add_raw_template(PAGE_TEMPLATE, &source)
            .map_err(|e| RenderError::TemplateLoad {
                path: self.template_path.clone(),
                source: e,
            })?;
        Ok(tera)
    }

    /// Render a page to an HTML string.
    pub fn render(&self, page: &Page) -> Result<String, RenderError> {
        let tera = self.load()?;

        let mut context = Context::new();
        context.insert("title", &page.title);
        context.insert("body", &page.body);

        tera.render(PAGE_TEMPLATE, &context)
            .map_err(|e| RenderError::Render {
                path: self.template_path.clone(),
                source: e,
            })
    }

    /// Render a page and emit it to a caller-supplied stream.
    pub fn render_to_writer(&self, page: &Page, out: &mut dyn Write) -> Result<(), RenderError> {
        let html = self.render(page)?;
        out.write_all(html.as_bytes())
            .map_err(|e| RenderError::Write {
                target: "output stream".to_string(),
                source: e,
            })
    }

    /// Render a page and persist it at `dest`.
    pub fn render_to_file(&self, page: &Page, dest: &Path) -> Result<(), RenderError> {
        let html = self.render(page)?;
        std::fs::write(dest, html).map_err(|e| RenderError::Write {
            target: dest.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn page() -> Page {
        Page {
            title: "First Post".to_string(),
            body: "Hello there.".to_string(),
        }
    }

    fn template_with(dir: &Path, content: &str) -> Renderer {
        let path = dir.join("template.tmpl");
        fs::write(&path, content).unwrap();
        Renderer::new(&path)
    }

    #[test]
    fn test_render_substitutes_title_and_body() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = template_with(dir.path(), "<h1>{{ title }}</h1>\n<p>{{ body }}</p>\n");

        let html = renderer.render(&page()).unwrap();
        assert!(html.contains("<h1>First Post</h1>"));
        assert!(html.contains("<p>Hello there.</p>"));
    }

    #[test]
    fn test_render_escapes_markup_in_content() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = template_with(dir.path(), "{{ title }}|{{ body }}");

        let html = renderer
            .render(&Page {
                title: "a < b".to_string(),
                body: "<script>alert(1)</script>".to_string(),
            })
            .unwrap();

        assert!(html.contains("a &lt; b"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_escaping_is_independent_of_template_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.tpl");
        fs::write(&path, "{{ body }}").unwrap();
        let renderer = Renderer::new(&path);

        let html = renderer
            .render(&Page {
                title: "t".to_string(),
                body: "<b>bold</b>".to_string(),
            })
            .unwrap();

        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains('<'));
    }

    #[test]
    fn test_missing_template_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = Renderer::new(&dir.path().join("absent.tmpl"));

        let err = renderer.render(&page()).unwrap_err();
        assert!(matches!(err, RenderError::TemplateLoad { .. }));
    }

    #[test]
    fn test_template_syntax_error_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = template_with(dir.path(), "{% if %}");

        let err = renderer.render(&page()).unwrap_err();
        assert!(matches!(err, RenderError::TemplateLoad { .. }));
    }

    #[test]
    fn test_unbound_placeholder_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = template_with(dir.path(), "{{ author }}");

        let err = renderer.render(&page()).unwrap_err();
        assert!(matches!(err, RenderError::Render { .. }));
    }

    #[test]
    fn test_template_is_reloaded_on_every_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.tmpl");
        fs::write(&path, "v1: {{ title }}").unwrap();
        let renderer = Renderer::new(&path);

        assert!(renderer.render(&page()).unwrap().starts_with("v1:"));

        fs::write(&path, "v2: {{ title }}").unwrap();
        assert!(renderer.render(&page()).unwrap().starts_with("v2:"));
    }

    #[test]
    fn test_render_to_writer_emits_full_page() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = template_with(dir.path(), "{{ title }}\n{{ body }}\n");

        let mut out = Vec::new();
        renderer.render_to_writer(&page(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "First Post\nHello there.\n");
    }

    #[test]
    fn test_render_to_file_writes_dest() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = template_with(dir.path(), "{{ title }}");
        let dest = dir.path().join("out.html");

        renderer.render_to_file(&page(), &dest).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "First Post");
    }

    #[test]
    fn test_unwritable_dest_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = template_with(dir.path(), "{{ title }}");
        let dest = dir.path().join("no-such-dir").join("out.html");

        let err = renderer.render_to_file(&page(), &dest).unwrap_err();
        assert!(matches!(err, RenderError::Write { .. }));
    }
}
