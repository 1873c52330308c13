//! Dialect adapters.
//!
//! Every supported templating dialect is wrapped in an adapter implementing
//! [`TemplateEngine`]. The facade depends only on this trait; backend
//! libraries never leak past their adapter module. The variant set is
//! closed: EJS-style, Markdown, Pug, Nunjucks, Handlebars (which also
//! answers to the `mustache` alias), and Liquid.
//!
//! Adapters are intentionally cheap to call: engines that need per-render
//! state build it inside `render`, so the adapters themselves stay shareable
//! behind `&self`.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RenderError;

mod ejs;
mod handlebars;
mod liquid;
mod markdown;
mod nunjucks;
mod pug;

pub use self::ejs::EjsEngine;
pub use self::handlebars::HandlebarsEngine;
pub use self::liquid::LiquidEngine;
pub use self::markdown::MarkdownEngine;
pub use self::nunjucks::NunjucksEngine;
pub use self::pug::PugEngine;

/// Canonical identifier of a supported dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineName {
    Ejs,
    Markdown,
    Pug,
    Nunjucks,
    Handlebars,
    /// Display-only alias: resolves to the Handlebars adapter at dispatch.
    Mustache,
    Liquid,
}

impl EngineName {
    /// All canonical names, in adapter registration order.
    pub const ALL: [EngineName; 7] = [
        EngineName::Ejs,
        EngineName::Markdown,
        EngineName::Pug,
        EngineName::Nunjucks,
        EngineName::Handlebars,
        EngineName::Mustache,
        EngineName::Liquid,
    ];

    /// The lowercase canonical form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EngineName::Ejs => "ejs",
            EngineName::Markdown => "markdown",
            EngineName::Pug => "pug",
            EngineName::Nunjucks => "nunjucks",
            EngineName::Handlebars => "handlebars",
            EngineName::Mustache => "mustache",
            EngineName::Liquid => "liquid",
        }
    }

    /// Parse a user-supplied name, tolerating case and surrounding space.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "ejs" => Some(EngineName::Ejs),
            "markdown" => Some(EngineName::Markdown),
            "pug" => Some(EngineName::Pug),
            "nunjucks" => Some(EngineName::Nunjucks),
            "handlebars" => Some(EngineName::Handlebars),
            "mustache" => Some(EngineName::Mustache),
            "liquid" => Some(EngineName::Liquid),
            _ => None,
        }
    }
}

impl std::fmt::Display for EngineName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform capability surface every dialect backend satisfies.
///
/// `root` is the directory adapters use to resolve includes, partials, and
/// layouts referenced from inside a template. Passing `None` disables that
/// resolution; adapters must still render self-contained templates.
#[async_trait]
pub trait TemplateEngine: Send + Sync {
    /// Dialect identifiers this adapter answers to.
    fn names(&self) -> &[&'static str];

    /// Currently registered file extensions, lowercase.
    fn extensions(&self) -> &[String];

    /// Replace the extension set (trimmed, lowercased, deduplicated).
    fn set_extensions(&mut self, extensions: &[&str]);

    /// Remove one extension from the set, ignoring case and whitespace.
    fn delete_extension(&mut self, extension: &str);

    /// Render a template against optional data.
    async fn render(
        &self,
        source: &str,
        data: Option<&Value>,
        root: Option<&Path>,
    ) -> Result<String, RenderError>;

    /// Blocking mirror of [`render`](TemplateEngine::render).
    fn render_sync(
        &self,
        source: &str,
        data: Option<&Value>,
        root: Option<&Path>,
    ) -> Result<String, RenderError>;
}

/// Normalized, deduplicated extension list shared by all adapters.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExtensionSet {
    values: Vec<String>,
}

impl ExtensionSet {
    pub(crate) fn new(defaults: &[&str]) -> Self {
        let mut set = Self::default();
        set.replace(defaults);
        set
    }

    pub(crate) fn as_slice(&self) -> &[String] {
        &self.values
    }

    pub(crate) fn replace(&mut self, extensions: &[&str]) {
        self.values.clear();
        for extension in extensions {
            let extension = extension.trim().to_lowercase();
            if !self.values.contains(&extension) {
                self.values.push(extension);
            }
        }
    }

    pub(crate) fn remove(&mut self, extension: &str) {
        let extension = extension.trim().to_lowercase();
        self.values.retain(|e| *e != extension);
    }
}
