//! Veneer - a template-engine consolidation facade.
//!
//! One API over seven templating dialects: EJS-style interpolation,
//! Markdown, Pug, Nunjucks, Handlebars, Mustache, and Liquid. Given a
//! template string or file, the facade picks the matching backend (by
//! explicit name, file extension, or a configurable default), renders it
//! against a JSON data context, optionally caches the result, and
//! optionally writes it to disk. A companion sniffer guesses the dialect of
//! unlabeled template text.
//!
//! # Architecture Overview
//!
//! - [`Veneer`] is the facade: engine resolution, the cache protocol,
//!   output writing, and degrade-to-empty error semantics live here.
//! - [`engines`] holds one adapter per dialect behind the
//!   [`TemplateEngine`](engines::TemplateEngine) trait; backend libraries
//!   never leak past their adapter.
//! - [`registry`] maps dialect names to file extensions, both directions.
//! - [`detect`] is the heuristic classifier (ordered rules, first match
//!   wins).
//! - [`cache`], [`events`], [`frontmatter`], and [`utils`] supply the
//!   render cache contract, observable signals, front-matter handling, and
//!   file-system plumbing.
//!
//! # Error Semantics
//!
//! The public `render*` methods return `String`, never `Result`: any
//! failure (bad template, missing file, unwritable output) degrades to an
//! empty string and an error event. Subscribe with
//! [`Veneer::on_event`] to observe failures and cache traffic.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use veneer::Veneer;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let veneer = Veneer::new();
//!
//! // Explicit dialect.
//! let out = veneer
//!     .render("Hello {{name}}!", Some(&json!({"name": "Ada"})), Some("handlebars"), None, None)
//!     .await;
//! assert_eq!(out, "Hello Ada!");
//!
//! // Sniff a dialect from raw text.
//! use veneer::engines::EngineName;
//! assert_eq!(veneer.detect_engine("{% assign x = 1 %}"), Some(EngineName::Liquid));
//! # }
//! ```

pub mod cache;
pub mod detect;
pub mod engines;
pub mod error;
pub mod events;
pub mod frontmatter;
pub mod registry;
pub mod renderer;
pub mod utils;

pub use cache::{MemoryCache, RenderCacheStore};
pub use detect::detect;
pub use engines::{EngineName, TemplateEngine};
pub use error::RenderError;
pub use events::RenderEvent;
pub use registry::ExtensionRegistry;
pub use renderer::{Veneer, VeneerOptions};
