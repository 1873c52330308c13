//! File-based entry points: reading templates, writing output, and
//! extension-driven engine resolution.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use veneer::{RenderEvent, Veneer};

const EJS_SOURCE: &str = "<h2><%= test.foo %></h2>";

#[tokio::test]
async fn render_writes_output_creating_parent_directories() {
    let veneer = Veneer::new();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("a/b/c/out.html");

    let data = json!({"test": {"foo": "bar"}});
    let rendered =
        veneer.render(EJS_SOURCE, Some(&data), Some("ejs"), None, Some(&output)).await;

    assert_eq!(rendered, "<h2>bar</h2>");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), rendered);
}

#[test]
fn render_sync_writes_output_the_same_way() {
    let veneer = Veneer::new();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("ejs/out.html");

    let data = json!({"test": {"foo": "bar"}});
    let rendered = veneer.render_sync(EJS_SOURCE, Some(&data), None, None, Some(&output));

    assert_eq!(rendered, "<h2>bar</h2>");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), rendered);
}

#[tokio::test]
async fn output_files_are_overwritten() {
    let veneer = Veneer::new();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.html");
    std::fs::write(&output, "stale").unwrap();

    veneer.render("fresh", None, Some("handlebars"), None, Some(&output)).await;

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "fresh");
}

#[tokio::test]
async fn empty_output_is_not_written() {
    let mut veneer = Veneer::new();
    let errors = Arc::new(AtomicUsize::new(0));
    let seen = errors.clone();
    veneer.on_event(move |event| {
        if matches!(event, RenderEvent::Error(_)) {
            seen.fetch_add(1, Ordering::SeqCst);
        }
    });

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.html");

    // Pug has no backend, so this render fails and must leave no file.
    let rendered = veneer.render("p Hello", None, Some("pug"), None, Some(&output)).await;

    assert_eq!(rendered, "");
    assert!(!output.exists());
    assert_eq!(errors.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn render_from_file_uses_the_extension() {
    let veneer = Veneer::new();
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("list.njk");
    std::fs::write(&template, "{% for item in items %}{{ item }}{% endfor %}").unwrap();

    let data = json!({"items": ["a", "b", "c"]});
    let rendered = veneer.render_from_file(&template, Some(&data), None, None, None).await;

    assert_eq!(rendered, "abc");
}

#[tokio::test]
async fn render_from_file_honors_an_explicit_engine() {
    let veneer = Veneer::new();
    let dir = tempfile::tempdir().unwrap();
    // The .html extension is unmapped; the explicit name must win over the
    // default fallback.
    let template = dir.path().join("greeting.html");
    std::fs::write(&template, "Hi {{name}}").unwrap();

    let data = json!({"name": "Ada"});
    let rendered =
        veneer.render_from_file(&template, Some(&data), None, None, Some("handlebars")).await;

    assert_eq!(rendered, "Hi Ada");
}

#[test]
fn render_from_file_sync_matches() {
    let veneer = Veneer::new();
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("greeting.liquid");
    std::fs::write(&template, "{{ name | upcase }}").unwrap();

    let data = json!({"name": "ada"});
    let rendered = veneer.render_from_file_sync(&template, Some(&data), None, None, None);

    assert_eq!(rendered, "ADA");
}

#[tokio::test]
async fn missing_template_file_degrades_to_empty() {
    let mut veneer = Veneer::new();
    let errors = Arc::new(AtomicUsize::new(0));
    let seen = errors.clone();
    veneer.on_event(move |event| {
        if matches!(event, RenderEvent::Error(_)) {
            seen.fetch_add(1, Ordering::SeqCst);
        }
    });

    let rendered = veneer
        .render_from_file(Path::new("/definitely/not/here.njk"), None, None, None, None)
        .await;

    assert_eq!(rendered, "");
    assert_eq!(errors.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn nunjucks_includes_resolve_against_the_template_directory() {
    let veneer = Veneer::new();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("header.njk"), "<header>Site</header>").unwrap();
    let template = dir.path().join("page.njk");
    std::fs::write(&template, "{% include \"header.njk\" %}<main>{{ body }}</main>").unwrap();

    let data = json!({"body": "content"});
    let rendered = veneer.render_from_file(&template, Some(&data), None, None, None).await;

    assert_eq!(rendered, "<header>Site</header><main>content</main>");
}

#[test]
fn find_template_without_extension_returns_the_first_match() {
    let veneer = Veneer::new();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bar.njk"), "x").unwrap();
    std::fs::write(dir.path().join("unrelated.txt"), "y").unwrap();

    let found = veneer.find_template_without_extension(dir.path(), "bar");
    assert_eq!(found, Some(dir.path().join("bar.njk")));

    assert_eq!(veneer.find_template_without_extension(dir.path(), "baz"), None);
}
