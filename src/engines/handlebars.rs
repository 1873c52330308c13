//! Handlebars adapter, also serving the `mustache` alias.
//!
//! Mustache templates are a subset of Handlebars syntax, so one backend
//! covers both names; only the extension registrations differ for callers
//! inspecting the registry. HTML escaping is disabled: the facade's output
//! contract is the raw rendered text, and escaping belongs to whoever embeds
//! it in a document.

use std::path::Path;

use async_trait::async_trait;
use handlebars::{DirectorySourceOptions, Handlebars, no_escape};
use serde_json::Value;

use super::{ExtensionSet, TemplateEngine};
use crate::error::RenderError;

/// Adapter answering to the `handlebars` and `mustache` dialect names.
#[derive(Debug)]
pub struct HandlebarsEngine {
    extensions: ExtensionSet,
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlebarsEngine {
    pub fn new() -> Self {
        Self {
            extensions: ExtensionSet::new(&["hbs", "hjs", "handlebars", "mustache"]),
        }
    }

    fn render_impl(
        &self,
        source: &str,
        data: Option<&Value>,
        root: Option<&Path>,
    ) -> Result<String, RenderError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);

        // A root path turns every `.hbs` file under it into a named partial.
        if let Some(root) = root {
            registry
                .register_templates_directory(root, DirectorySourceOptions::default())
                .map_err(|e| RenderError::engine("handlebars", e))?;
        }

        let data = data.unwrap_or(&Value::Null);
        registry.render_template(source, data).map_err(|e| RenderError::engine("handlebars", e))
    }
}

#[async_trait]
impl TemplateEngine for HandlebarsEngine {
    fn names(&self) -> &[&'static str] {
        &["handlebars", "mustache"]
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
        data: Option<&Value>,
        root: Option<&Path>,
    ) -> Result<String, RenderError> {
        self.render_impl(source, data, root)
    }

    fn render_sync(
        &self,
        source: &str,
        data: Option<&Value>,
        root: Option<&Path>,
    ) -> Result<String, RenderError> {
        self.render_impl(source, data, root)
    }
}
