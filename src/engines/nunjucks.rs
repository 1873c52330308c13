//! Nunjucks adapter backed by `tera`.
//!
//! Nunjucks and Tera are both Jinja2 dialects; the `{% %}` tag set, `{{ }}`
//! interpolation, and filters line up closely enough that Tera renders
//! typical Nunjucks templates unchanged. A fresh `Tera` instance is built
//! per render call: it is cheap, and it lets the root template path vary
//! between calls without shared state.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tera::Tera;

use super::{ExtensionSet, TemplateEngine};
use crate::error::RenderError;

/// Adapter answering to the `nunjucks` dialect name.
#[derive(Debug)]
pub struct NunjucksEngine {
    extensions: ExtensionSet,
}

impl Default for NunjucksEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NunjucksEngine {
    pub fn new() -> Self {
        Self {
            extensions: ExtensionSet::new(&["njk"]),
        }
    }

    fn render_impl(
        &self,
        source: &str,
        data: Option<&Value>,
        root: Option<&Path>,
    ) -> Result<String, RenderError> {
        // With a root path, load the directory tree so {% include %} and
        // {% extends %} can resolve named templates.
        let mut tera = match root {
            Some(root) => Tera::new(&format!("{}/**/*", root.display()))
                .map_err(|e| RenderError::engine("nunjucks", format_tera_error(&e)))?,
            None => Tera::default(),
        };

        let context = match data {
            Some(value) => tera::Context::from_serialize(value).map_err(|e| RenderError::Data {
                engine: "nunjucks",
                message: e.to_string(),
            })?,
            None => tera::Context::new(),
        };

        tera.render_str(source, &context)
            .map_err(|e| RenderError::engine("nunjucks", format_tera_error(&e)))
    }
}

/// Flatten a Tera error chain into one line, dropping the internal
/// `__tera_one_off` template name it assigns to string renders.
fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }

    let cleaned: Vec<String> = messages
        .into_iter()
        .map(|m| m.replace("'__tera_one_off'", "template").trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();

    cleaned.join(": ")
}

#[async_trait]
impl TemplateEngine for NunjucksEngine {
    fn names(&self) -> &[&'static str] {
        &["nunjucks"]
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
