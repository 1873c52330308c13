//! The consolidation facade.
//!
//! [`Veneer`] owns one adapter per dialect, the name/extension registry,
//! optional render caches, and the event bus. It resolves which adapter a
//! call should use (explicit name, file-extension inference, or the default
//! engine), runs the cache protocol around the render, and optionally
//! persists the output to disk.
//!
//! Failure never propagates out of the public `render*` methods: a broken
//! template, unreadable source file, or unwritable output path degrades to
//! an empty string plus an error event. From the return value alone, a
//! failed render is indistinguishable from rendering an empty template;
//! subscribe to events to tell the two apart.
//!
//! Configuration (default engine, caches, extension mutation) is expected
//! to happen during setup. The facade takes no locks around its registry or
//! adapters; configure before the first render instead of mutating from
//! concurrent callers.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::cache::{MemoryCache, RenderCacheStore};
use crate::detect;
use crate::engines::{
    EjsEngine, EngineName, HandlebarsEngine, LiquidEngine, MarkdownEngine, NunjucksEngine,
    PugEngine, TemplateEngine,
};
use crate::events::{EventBus, RenderEvent};
use crate::frontmatter;
use crate::registry::ExtensionRegistry;
use crate::utils::fs;

/// Construction options for [`Veneer`].
#[derive(Debug, Default)]
pub struct VeneerOptions {
    /// Default dialect to fall back to; ignored unless it names a
    /// registered dialect.
    pub default_engine: Option<String>,
    /// Install the built-in [`MemoryCache`] in both cache slots.
    pub cache: bool,
}

/// Template-engine consolidation facade.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use veneer::Veneer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let veneer = Veneer::new();
///
/// let data = json!({"firstName": "John", "lastName": "Doe"});
/// let html = veneer
///     .render("<h1>Hello <%= firstName %> <%= lastName %>!</h1>", Some(&data), None, None, None)
///     .await;
/// assert_eq!(html, "<h1>Hello John Doe!</h1>");
/// # }
/// ```
pub struct Veneer {
    mappings: ExtensionRegistry,
    default_engine: String,
    cache: Option<Box<dyn RenderCacheStore>>,
    cache_sync: Option<Box<dyn RenderCacheStore>>,
    events: EventBus,

    /// EJS-style interpolation adapter.
    pub ejs: EjsEngine,
    /// Markdown adapter.
    pub markdown: MarkdownEngine,
    /// Pug adapter (name and extensions only; no backend).
    pub pug: PugEngine,
    /// Nunjucks adapter.
    pub nunjucks: NunjucksEngine,
    /// Handlebars adapter, also serving the `mustache` alias.
    pub handlebars: HandlebarsEngine,
    /// Liquid adapter.
    pub liquid: LiquidEngine,
}

impl Default for Veneer {
    fn default() -> Self {
        Self::new()
    }
}

impl Veneer {
    /// Create a facade with all adapters registered and `ejs` as the
    /// default engine.
    pub fn new() -> Self {
        Self::with_options(VeneerOptions::default())
    }

    /// Create a facade, optionally overriding the default engine and
    /// enabling the built-in cache.
    ///
    /// An unrecognized `default_engine` is ignored (with a warning event on
    /// the bus, though listeners attached later will not see it) and the
    /// default stays `ejs`.
    pub fn with_options(options: VeneerOptions) -> Self {
        let mut veneer = Self {
            mappings: ExtensionRegistry::new(),
            default_engine: EngineName::Ejs.as_str().to_string(),
            cache: None,
            cache_sync: None,
            events: EventBus::default(),
            ejs: EjsEngine::new(),
            markdown: MarkdownEngine::new(),
            pug: PugEngine::new(),
            nunjucks: NunjucksEngine::new(),
            handlebars: HandlebarsEngine::new(),
            liquid: LiquidEngine::new(),
        };

        veneer.register_mappings();

        if let Some(name) = options.default_engine {
            veneer.set_default_engine(&name);
        }
        if options.cache {
            veneer.cache = Some(Box::new(MemoryCache::new()));
            veneer.cache_sync = Some(Box::new(MemoryCache::new()));
        }

        veneer
    }

    /// The dialect used when no valid engine name is given.
    pub fn default_engine(&self) -> &str {
        &self.default_engine
    }

    /// Change the default dialect.
    ///
    /// Unregistered names are rejected with a warning event; the previous
    /// default stays in place. Configuration never panics or errors.
    pub fn set_default_engine(&mut self, name: &str) {
        let name = name.trim().to_lowercase();
        if self.is_valid_engine(&name) {
            self.default_engine = name;
        } else {
            self.events.emit(RenderEvent::Warning(format!(
                "ignoring unknown default engine '{name}'; keeping '{}'",
                self.default_engine
            )));
        }
    }

    /// The dialect-name → extension registry.
    pub fn mappings(&self) -> &ExtensionRegistry {
        &self.mappings
    }

    /// Mutable access to the registry, for deleting or retuning mappings.
    pub fn mappings_mut(&mut self) -> &mut ExtensionRegistry {
        &mut self.mappings
    }

    /// Register a listener for cache, warning, and error events.
    pub fn on_event<F>(&mut self, listener: F)
    where
        F: Fn(&RenderEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener);
    }

    /// Cache store consulted by the async render path, if any.
    pub fn cache(&self) -> Option<&dyn RenderCacheStore> {
        self.cache.as_deref()
    }

    /// Cache store consulted by the sync render path, if any.
    pub fn cache_sync(&self) -> Option<&dyn RenderCacheStore> {
        self.cache_sync.as_deref()
    }

    /// Install (or remove) the async-path cache store.
    pub fn set_cache(&mut self, cache: Option<Box<dyn RenderCacheStore>>) {
        self.cache = cache;
    }

    /// Install (or remove) the sync-path cache store.
    pub fn set_cache_sync(&mut self, cache: Option<Box<dyn RenderCacheStore>>) {
        self.cache_sync = cache;
    }

    /// Install the built-in [`MemoryCache`] in both slots.
    pub fn enable_cache(&mut self) {
        self.cache = Some(Box::new(MemoryCache::new()));
        self.cache_sync = Some(Box::new(MemoryCache::new()));
    }

    /// All adapters, in registration order.
    fn engines(&self) -> [&dyn TemplateEngine; 6] {
        [&self.ejs, &self.markdown, &self.pug, &self.nunjucks, &self.handlebars, &self.liquid]
    }

    /// Union every adapter's declared names and extensions into the
    /// registry.
    ///
    /// Called at construction; call it again after mutating an adapter's
    /// extension set. Re-registration fully replaces each dialect's entry,
    /// so repeated calls do not accumulate duplicates.
    pub fn register_mappings(&mut self) {
        let mut declared: Vec<(&'static str, Vec<String>)> = Vec::new();
        for engine in self.engines() {
            for &name in engine.names() {
                declared.push((name, engine.extensions().to_vec()));
            }
        }
        for (name, extensions) in declared {
            self.mappings.set(name, &extensions);
        }
    }

    /// Whether a name is a registered dialect.
    pub fn is_valid_engine(&self, name: &str) -> bool {
        !name.trim().is_empty() && self.mappings.get(name).is_some()
    }

    /// Infer a dialect name from a file path's extension.
    ///
    /// The extension is the substring after the last `.`; paths without one,
    /// or with an unmapped extension, fall back to the default engine.
    pub fn get_engine_by_file_path(&self, file_path: &str) -> String {
        let extension = file_path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        match self.mappings.get_name(extension) {
            Some(name) => name.to_string(),
            None => self.default_engine.clone(),
        }
    }

    /// Guess the dialect of raw template text. See [`detect::detect`].
    pub fn detect_engine(&self, source: &str) -> Option<EngineName> {
        detect::detect(source)
    }

    /// Resolve a dialect name to its adapter.
    ///
    /// `mustache` resolves to the Handlebars adapter; anything unrecognized
    /// resolves to the EJS adapter, mirroring the default-engine fallback.
    pub fn engine_for(&self, name: &str) -> &dyn TemplateEngine {
        match name.trim().to_lowercase().as_str() {
            "markdown" => &self.markdown,
            "pug" => &self.pug,
            "nunjucks" => &self.nunjucks,
            "handlebars" | "mustache" => &self.handlebars,
            "liquid" => &self.liquid,
            _ => &self.ejs,
        }
    }

    /// Render a template string.
    ///
    /// * `engine_name`: dialect to use; invalid or absent names fall back
    ///   to the default engine.
    /// * `root`: directory for resolving includes/partials inside the
    ///   template; `None` disables that resolution.
    /// * `output_path`: when given and the output is non-empty, the result
    ///   is written there, creating parent directories as needed.
    ///
    /// Returns the rendered string, or `""` after emitting an error event
    /// if anything failed.
    pub async fn render(
        &self,
        source: &str,
        data: Option<&Value>,
        engine_name: Option<&str>,
        root: Option<&Path>,
        output_path: Option<&Path>,
    ) -> String {
        let engine_name = self.resolve_engine_name(engine_name);
        let key = Self::cache_key(&engine_name, source, data);

        match self.try_render(source, data, &engine_name, &key, root, output_path).await {
            Ok(rendered) => rendered,
            Err(err) => {
                self.events.emit(RenderEvent::Error(format!("render failed: {err:#}")));
                String::new()
            }
        }
    }

    /// Blocking mirror of [`render`](Self::render), using the sync cache
    /// slot and blocking file I/O. Decision logic is shared, so the two
    /// paths cannot drift.
    pub fn render_sync(
        &self,
        source: &str,
        data: Option<&Value>,
        engine_name: Option<&str>,
        root: Option<&Path>,
        output_path: Option<&Path>,
    ) -> String {
        let engine_name = self.resolve_engine_name(engine_name);
        let key = Self::cache_key(&engine_name, source, data);

        match self.try_render_sync(source, data, &engine_name, &key, root, output_path) {
            Ok(rendered) => rendered,
            Err(err) => {
                self.events.emit(RenderEvent::Error(format!("render failed: {err:#}")));
                String::new()
            }
        }
    }

    /// Render a template file.
    ///
    /// The dialect defaults to the file extension's mapping, and the root
    /// template path defaults to the file's directory, so sibling partials
    /// resolve without extra configuration.
    pub async fn render_from_file(
        &self,
        file_path: &Path,
        data: Option<&Value>,
        root: Option<&Path>,
        output_path: Option<&Path>,
        engine_name: Option<&str>,
    ) -> String {
        let engine_name = match engine_name {
            Some(name) => name.to_string(),
            None => self.get_engine_by_file_path(&file_path.to_string_lossy()),
        };
        let root = root.map(Path::to_path_buf).or_else(|| file_path.parent().map(Path::to_path_buf));

        let source = match fs::read_text_async(file_path).await {
            Ok(source) => source,
            Err(err) => {
                self.events.emit(RenderEvent::Error(format!("render failed: {err:#}")));
                return String::new();
            }
        };

        self.render(&source, data, Some(&engine_name), root.as_deref(), output_path).await
    }

    /// Blocking mirror of [`render_from_file`](Self::render_from_file).
    pub fn render_from_file_sync(
        &self,
        file_path: &Path,
        data: Option<&Value>,
        root: Option<&Path>,
        output_path: Option<&Path>,
        engine_name: Option<&str>,
    ) -> String {
        let engine_name = match engine_name {
            Some(name) => name.to_string(),
            None => self.get_engine_by_file_path(&file_path.to_string_lossy()),
        };
        let root = root.map(Path::to_path_buf).or_else(|| file_path.parent().map(Path::to_path_buf));

        let source = match fs::read_text(file_path) {
            Ok(source) => source,
            Err(err) => {
                self.events.emit(RenderEvent::Error(format!("render failed: {err:#}")));
                return String::new();
            }
        };

        self.render_sync(&source, data, Some(&engine_name), root.as_deref(), output_path)
    }

    /// Find the first file in `dir` named `base_name` plus any extension.
    ///
    /// Directory-listing order decides ties when several candidates share
    /// the base name.
    pub fn find_template_without_extension(&self, dir: &Path, base_name: &str) -> Option<PathBuf> {
        let prefix = format!("{base_name}.");
        let entries = std::fs::read_dir(dir).ok()?;
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if file_name.starts_with(&prefix) {
                return Some(dir.join(file_name.as_ref()));
            }
        }
        None
    }

    /// Whether `content` starts with a front-matter block.
    pub fn has_front_matter(&self, content: &str) -> bool {
        frontmatter::has_front_matter(content)
    }

    /// Extract front matter as a JSON map.
    pub fn front_matter(&self, content: &str) -> Option<Value> {
        frontmatter::front_matter(content)
    }

    /// Prepend or replace a front-matter block.
    pub fn set_front_matter(&self, content: &str, data: &Value) -> String {
        frontmatter::set_front_matter(content, data)
    }

    /// Strip a leading front-matter block.
    pub fn remove_front_matter(&self, content: &str) -> String {
        frontmatter::remove_front_matter(content)
    }

    /// Pick the dialect for a render call: the requested name when valid,
    /// the default engine otherwise.
    fn resolve_engine_name(&self, requested: Option<&str>) -> String {
        match requested {
            Some(name) if self.is_valid_engine(name) => name.trim().to_lowercase(),
            _ => self.default_engine.clone(),
        }
    }

    /// Composite cache key: dialect, source text, and the data as JSON.
    fn cache_key(engine_name: &str, source: &str, data: Option<&Value>) -> String {
        let data_json = match data {
            Some(value) => serde_json::to_string(value).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        };
        format!("{engine_name}-{source}-{data_json}")
    }

    async fn try_render(
        &self,
        source: &str,
        data: Option<&Value>,
        engine_name: &str,
        key: &str,
        root: Option<&Path>,
        output_path: Option<&Path>,
    ) -> anyhow::Result<String> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(key) {
                self.events.emit(RenderEvent::CacheHit { key: key.to_string() });
                if let Some(path) = output_path
                    && !hit.is_empty()
                {
                    fs::write_text_async(path, &hit).await?;
                }
                return Ok(hit);
            }
            self.events.emit(RenderEvent::CacheMiss { key: key.to_string() });
        }

        let engine = self.engine_for(engine_name);
        let rendered = engine.render(source, data, root).await?;

        if let Some(cache) = &self.cache {
            cache.set(key, rendered.clone());
        }

        if let Some(path) = output_path
            && !rendered.is_empty()
        {
            fs::write_text_async(path, &rendered).await?;
        }

        Ok(rendered)
    }

    fn try_render_sync(
        &self,
        source: &str,
        data: Option<&Value>,
        engine_name: &str,
        key: &str,
        root: Option<&Path>,
        output_path: Option<&Path>,
    ) -> anyhow::Result<String> {
        if let Some(cache) = &self.cache_sync {
            if let Some(hit) = cache.get(key) {
                self.events.emit(RenderEvent::CacheHit { key: key.to_string() });
                if let Some(path) = output_path
                    && !hit.is_empty()
                {
                    fs::write_text(path, &hit)?;
                }
                return Ok(hit);
            }
            self.events.emit(RenderEvent::CacheMiss { key: key.to_string() });
        }

        let engine = self.engine_for(engine_name);
        let rendered = engine.render_sync(source, data, root)?;

        if let Some(cache) = &self.cache_sync {
            cache.set(key, rendered.clone());
        }

        if let Some(path) = output_path
            && !rendered.is_empty()
        {
            fs::write_text(path, &rendered)?;
        }

        Ok(rendered)
    }
}

impl std::fmt::Debug for Veneer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Veneer")
            .field("default_engine", &self.default_engine)
            .field("mappings", &self.mappings)
            .field("cache", &self.cache.is_some())
            .field("cache_sync", &self.cache_sync.is_some())
            .finish()
    }
}
