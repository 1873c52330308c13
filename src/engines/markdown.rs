//! Markdown adapter backed by `pulldown-cmark`.

use std::path::Path;

use async_trait::async_trait;
use pulldown_cmark::{Options, Parser, html};
use serde_json::Value;

use super::{ExtensionSet, TemplateEngine};
use crate::error::RenderError;
use crate::frontmatter;

/// Adapter answering to the `markdown` dialect name.
///
/// Markdown has no variables, so render data is accepted and ignored. A
/// leading front-matter block is stripped before compilation; it is
/// document metadata, not content.
#[derive(Debug)]
pub struct MarkdownEngine {
    extensions: ExtensionSet,
}

impl Default for MarkdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownEngine {
    pub fn new() -> Self {
        Self {
            extensions: ExtensionSet::new(&["md", "markdown"]),
        }
    }

    fn render_impl(&self, source: &str) -> Result<String, RenderError> {
        let body = frontmatter::remove_front_matter(source);

        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(&body, options);
        let mut out = String::with_capacity(body.len() * 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

#[async_trait]
impl TemplateEngine for MarkdownEngine {
    fn names(&self) -> &[&'static str] {
        &["markdown"]
    }

    fn extensions(&self) -> &[String] {
        self.extensions.as_slice()
    }

    fn set_extensions(&mut self, extensions: &[&str]) {
        self.extensions.replace(extensions);
    }

    fn delete_extension(&mut self, extension: &str) {
        self.extensions.remove(extension);
    }

    async fn render(
        &self,
        source: &str,
        _data: Option<&Value>,
        _root: Option<&Path>,
    ) -> Result<String, RenderError> {
        self.render_impl(source)
    }

    fn render_sync(
        &self,
        source: &str,
        _data: Option<&Value>,
        _root: Option<&Path>,
    ) -> Result<String, RenderError> {
        self.render_impl(source)
    }
}
