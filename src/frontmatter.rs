//! Front-matter handling, delegated to `gray_matter`.
//!
//! A front-matter block is a leading `---` fenced YAML section carrying
//! document metadata. The facade exposes detection, extraction, injection,
//! and removal; it never interprets the metadata itself. Extraction returns
//! `serde_json::Value` maps so callers can feed the metadata straight back
//! into render data.

use gray_matter::engine::{Engine, YAML};
use gray_matter::{Matter, Pod};
use serde_json::Value;

/// `gray_matter` engine that returns the raw front-matter text unparsed.
///
/// Used for presence checks and stripping, where malformed YAML should not
/// make the operation fail.
struct RawFrontMatter;

impl Engine for RawFrontMatter {
    fn parse(content: &str) -> Result<Pod, gray_matter::Error> {
        Ok(Pod::String(content.to_string()))
    }
}

/// Whether the text starts with a front-matter block.
pub fn has_front_matter(content: &str) -> bool {
    let matter = Matter::<RawFrontMatter>::new();
    matter.parse::<String>(content).map(|parsed| parsed.data.is_some()).unwrap_or(false)
}

/// Extract the front-matter block as a JSON map, if one is present and
/// parses as YAML.
pub fn front_matter(content: &str) -> Option<Value> {
    let matter = Matter::<YAML>::new();
    let parsed = matter.parse::<serde_yaml::Value>(content).ok()?;
    let data = parsed.data?;
    serde_json::to_value(data).ok()
}

/// Prepend (or replace) a front-matter block serialized from `data`.
///
/// Existing front matter is dropped first, so repeated calls update rather
/// than stack blocks.
pub fn set_front_matter(content: &str, data: &Value) -> String {
    let body = remove_front_matter(content);
    let yaml = serde_yaml::to_string(data).unwrap_or_default();
    format!("---\n{yaml}---\n{body}")
}

/// Return the text with any leading front-matter block removed.
pub fn remove_front_matter(content: &str) -> String {
    let matter = Matter::<RawFrontMatter>::new();
    match matter.parse::<String>(content) {
        Ok(parsed) if parsed.data.is_some() => parsed.content,
        _ => content.to_string(),
    }
}
