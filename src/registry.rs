//! Bidirectional mapping between dialect names and file extensions.
//!
//! The registry is populated once from the engine adapters and may be
//! mutated afterwards (deleting extensions, re-registering). Lookups in both
//! directions normalize their input, so `" EJS "` and `"ejs"` are the same
//! name and `".NJK"` is never a distinct extension from `"njk"`.

/// Ordered dialect-name → extension-set mapping with reverse lookup.
///
/// Entries keep registration order, and a re-registration of an existing
/// name replaces its extension set in place (it does not move the entry or
/// append duplicates). Both properties matter for [`get_name`]: when two
/// dialects claim the same extension, the entry registered later wins the
/// reverse lookup.
///
/// # Examples
///
/// ```rust
/// use veneer::registry::ExtensionRegistry;
///
/// let mut registry = ExtensionRegistry::new();
/// registry.set("ejs", &["ejs"]);
/// registry.set("markdown", &["md", "MD", " markdown "]);
///
/// assert_eq!(registry.get("Markdown"), Some(&["md".to_string(), "markdown".to_string()][..]));
/// assert_eq!(registry.get_name("md"), Some("markdown"));
/// assert_eq!(registry.get_name("bogus"), None);
/// ```
///
/// [`get_name`]: ExtensionRegistry::get_name
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    entries: Vec<(String, Vec<String>)>,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

impl ExtensionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or fully replace) the extension set for a dialect.
    ///
    /// The name and every extension are trimmed and lowercased; duplicate
    /// extensions are dropped, keeping first-seen order. Registering an
    /// empty name or an empty extension list is a silent no-op, not an
    /// error: adapters with nothing to declare simply leave no trace.
    pub fn set<S: AsRef<str>>(&mut self, name: &str, extensions: &[S]) {
        let name = normalize(name);
        if name.is_empty() || extensions.is_empty() {
            return;
        }

        let mut cleaned: Vec<String> = Vec::with_capacity(extensions.len());
        for extension in extensions {
            let extension = normalize(extension.as_ref());
            if !cleaned.contains(&extension) {
                cleaned.push(extension);
            }
        }

        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = cleaned;
        } else {
            self.entries.push((name, cleaned));
        }
    }

    /// Look up the extension set for a dialect name.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        let name = normalize(name);
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, exts)| exts.as_slice())
    }

    /// Remove a dialect entirely.
    pub fn delete(&mut self, name: &str) {
        let name = normalize(name);
        self.entries.retain(|(n, _)| *n != name);
    }

    /// Remove a single extension from a dialect's set.
    ///
    /// A no-op when the dialect is unknown or the extension is absent.
    pub fn delete_extension(&mut self, name: &str, extension: &str) {
        let name = normalize(name);
        let extension = normalize(extension);
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1.retain(|e| *e != extension);
        }
    }

    /// Reverse lookup: find the dialect that claims an extension.
    ///
    /// Scans entries in registration order and keeps the *last* match, so
    /// when several dialects claim the same extension the most recently
    /// registered one wins. The handlebars/mustache alias pair relies on
    /// this; do not lean on it for any other overlap.
    pub fn get_name(&self, extension: &str) -> Option<&str> {
        let extension = normalize(extension);
        let mut found = None;
        for (name, extensions) in &self.entries {
            if extensions.iter().any(|e| *e == extension) {
                found = Some(name.as_str());
            }
        }
        found
    }

    /// Registered dialect names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of registered dialects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
