//! Pug adapter placeholder.
//!
//! No maintained Pug runtime exists on crates.io, so this adapter owns the
//! dialect's name and extensions (keeping `.pug`/`.jade` resolution and
//! validation working) but cannot compile templates. Rendering reports
//! [`RenderError::BackendUnavailable`], which the facade degrades to an
//! empty result plus an error event. Callers who need Pug output can
//! implement [`TemplateEngine`] over their own backend.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use super::{ExtensionSet, TemplateEngine};
use crate::error::RenderError;

/// Adapter answering to the `pug` dialect name.
#[derive(Debug)]
pub struct PugEngine {
    extensions: ExtensionSet,
}

impl Default for PugEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PugEngine {
    pub fn new() -> Self {
        Self {
            extensions: ExtensionSet::new(&["pug", "jade"]),
        }
    }
}

#[async_trait]
impl TemplateEngine for PugEngine {
    fn names(&self) -> &[&'static str] {
        &["pug"]
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
        _source: &str,
        _data: Option<&Value>,
        _root: Option<&Path>,
    ) -> Result<String, RenderError> {
        Err(RenderError::BackendUnavailable("pug"))
    }

    fn render_sync(
        &self,
        _source: &str,
        _data: Option<&Value>,
        _root: Option<&Path>,
    ) -> Result<String, RenderError> {
        Err(RenderError::BackendUnavailable("pug"))
    }
}
