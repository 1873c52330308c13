//! EJS-style interpolation adapter.
//!
//! There is no EJS runtime in the Rust ecosystem, so this adapter wears
//! EJS delimiters over a [`minijinja`] environment: `<%= expr %>` renders an
//! expression and `<%# ... %>` is a comment. Scriptlet blocks (`<% code %>`)
//! embed JavaScript in the original dialect and are passed through as
//! literal text rather than evaluated.

use std::path::Path;

use async_trait::async_trait;
use minijinja::Environment;
use minijinja::syntax::SyntaxConfig;
use serde_json::Value;

use super::{ExtensionSet, TemplateEngine};
use crate::error::RenderError;

/// Adapter answering to the `ejs` dialect name.
pub struct EjsEngine {
    extensions: ExtensionSet,
    syntax: SyntaxConfig,
}

impl std::fmt::Debug for EjsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EjsEngine").field("extensions", &self.extensions).finish()
    }
}

impl Default for EjsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EjsEngine {
    pub fn new() -> Self {
        // Delimiters are static and known-good; build cannot fail here.
        let syntax = SyntaxConfig::builder()
            .variable_delimiters("<%=", "%>")
            .comment_delimiters("<%#", "%>")
            .build()
            .expect("EJS delimiter configuration is valid");

        Self {
            extensions: ExtensionSet::new(&["ejs"]),
            syntax,
        }
    }

    fn render_impl(
        &self,
        source: &str,
        data: Option<&Value>,
        root: Option<&Path>,
    ) -> Result<String, RenderError> {
        let mut env = Environment::new();
        env.set_syntax(self.syntax.clone());

        if let Some(root) = root {
            env.set_loader(minijinja::path_loader(root));
        }

        let context = match data {
            Some(value) => minijinja::Value::from_serialize(value),
            None => minijinja::Value::from_serialize(serde_json::Map::new()),
        };

        env.render_str(source, context).map_err(|e| RenderError::engine("ejs", e))
    }
}

#[async_trait]
impl TemplateEngine for EjsEngine {
    fn names(&self) -> &[&'static str] {
        &["ejs"]
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
