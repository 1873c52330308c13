//! Liquid adapter backed by the `liquid` crate.

use std::path::Path;

use async_trait::async_trait;
use liquid::partials::{EagerCompiler, InMemorySource};
use serde_json::Value;
use walkdir::WalkDir;

use super::{ExtensionSet, TemplateEngine};
use crate::error::RenderError;

/// Adapter answering to the `liquid` dialect name.
#[derive(Debug)]
pub struct LiquidEngine {
    extensions: ExtensionSet,
}

impl Default for LiquidEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LiquidEngine {
    pub fn new() -> Self {
        Self {
            extensions: ExtensionSet::new(&["liquid"]),
        }
    }

    /// Preload every file under `root` as a named partial so that
    /// `{% include %}` / `{% render %}` tags resolve. Partials are addressable
    /// by their root-relative path, with and without the `.liquid` suffix.
    fn load_partials(root: &Path) -> EagerCompiler<InMemorySource> {
        let mut source = InMemorySource::new();

        for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(contents) = std::fs::read_to_string(entry.path()) else {
                continue;
            };
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let name = relative.to_string_lossy().replace('\\', "/");
            if let Some(stem) = name.strip_suffix(".liquid") {
                source.add(stem.to_string(), contents.clone());
            }
            source.add(name, contents);
        }

        EagerCompiler::new(source)
    }

    fn render_impl(
        &self,
        source: &str,
        data: Option<&Value>,
        root: Option<&Path>,
    ) -> Result<String, RenderError> {
        // ParserBuilder's type changes once partials are attached, so each
        // arm builds its own parser.
        let parser = match root {
            Some(root) => liquid::ParserBuilder::with_stdlib()
                .partials(Self::load_partials(root))
                .build(),
            None => liquid::ParserBuilder::with_stdlib().build(),
        }
        .map_err(|e| RenderError::engine("liquid", e))?;

        let template = parser.parse(source).map_err(|e| RenderError::engine("liquid", e))?;

        let globals = match data {
            Some(value) => liquid::model::to_object(value).map_err(|e| RenderError::Data {
                engine: "liquid",
                message: e.to_string(),
            })?,
            None => liquid::Object::new(),
        };

        template.render(&globals).map_err(|e| RenderError::engine("liquid", e))
    }
}

#[async_trait]
impl TemplateEngine for LiquidEngine {
    fn names(&self) -> &[&'static str] {
        &["liquid"]
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
