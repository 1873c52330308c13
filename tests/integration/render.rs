//! End-to-end rendering through the facade.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use veneer::{RenderEvent, Veneer};

const HANDLEBARS_SOURCE: &str = "<p>Hello, my name is {{name}}. I'm from {{hometown}}.</p>";

fn error_counter(veneer: &mut Veneer) -> Arc<AtomicUsize> {
    let errors = Arc::new(AtomicUsize::new(0));
    let seen = errors.clone();
    veneer.on_event(move |event| {
        if matches!(event, RenderEvent::Error(_)) {
            seen.fetch_add(1, Ordering::SeqCst);
        }
    });
    errors
}

#[tokio::test]
async fn renders_ejs_interpolation_by_default() {
    let veneer = Veneer::new();
    let data = json!({"firstName": "John", "lastName": "Doe"});
    let out = veneer
        .render("<h1>Hello <%= firstName %> <%= lastName %>!</h1>", Some(&data), None, None, None)
        .await;
    assert_eq!(out, "<h1>Hello John Doe!</h1>");
}

#[tokio::test]
async fn renders_handlebars_by_name() {
    let veneer = Veneer::new();
    let data = json!({"name": "Alan O'Connor", "hometown": "Somewhere, TX"});
    let out = veneer.render(HANDLEBARS_SOURCE, Some(&data), Some("handlebars"), None, None).await;
    assert_eq!(out, "<p>Hello, my name is Alan O'Connor. I'm from Somewhere, TX.</p>");
}

#[tokio::test]
async fn mustache_alias_renders_through_handlebars() {
    let veneer = Veneer::new();
    let data = json!({"name": "Ada"});
    let out = veneer.render("Hi {{name}}", Some(&data), Some("mustache"), None, None).await;
    assert_eq!(out, "Hi Ada");
}

#[tokio::test]
async fn handlebars_source_passes_through_the_default_engine() {
    // Without an engine name the default (EJS-style) engine runs, which
    // leaves {{ }} syntax untouched.
    let veneer = Veneer::new();
    let data = json!({"name": "Alan"});
    let out = veneer.render(HANDLEBARS_SOURCE, Some(&data), None, None, None).await;
    assert_eq!(out, HANDLEBARS_SOURCE);
}

#[tokio::test]
async fn renders_nunjucks_loops() {
    let veneer = Veneer::new();
    let data = json!({"fruits": ["Apple", "Pear", "Orange"]});
    let out = veneer
        .render(
            "{% for fruit in fruits %}<li>{{ fruit }}</li>{% endfor %}",
            Some(&data),
            Some("nunjucks"),
            None,
            None,
        )
        .await;
    assert_eq!(out, "<li>Apple</li><li>Pear</li><li>Orange</li>");
}

#[tokio::test]
async fn renders_liquid_filters() {
    let veneer = Veneer::new();
    let out = veneer
        .render(
            "{% assign greeting = 'hello' %}{{ greeting | upcase }}",
            None,
            Some("liquid"),
            None,
            None,
        )
        .await;
    assert_eq!(out, "HELLO");
}

#[tokio::test]
async fn renders_markdown_to_html() {
    let veneer = Veneer::new();
    let out = veneer.render("# Title", None, Some("markdown"), None, None).await;
    assert!(out.contains("<h1>Title</h1>"));
}

#[tokio::test]
async fn invalid_engine_name_falls_back_to_the_default() {
    let veneer = Veneer::new();
    let data = json!({"name": "Ada"});
    let out = veneer.render("<%= name %>", Some(&data), Some("cool"), None, None).await;
    assert_eq!(out, "Ada");
}

#[tokio::test]
async fn failed_render_degrades_to_empty_with_one_error_event() {
    let mut veneer = Veneer::new();
    let errors = error_counter(&mut veneer);

    let out = veneer.render("p Hello", None, Some("pug"), None, None).await;

    assert_eq!(out, "");
    assert_eq!(errors.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_template_degrades_to_empty() {
    let mut veneer = Veneer::new();
    let errors = error_counter(&mut veneer);

    let out = veneer.render("{% endfor %}", None, Some("nunjucks"), None, None).await;

    assert_eq!(out, "");
    assert_eq!(errors.load(Ordering::SeqCst), 1);
}

#[test]
fn sync_path_matches_async_results() {
    let veneer = Veneer::new();
    let data = json!({"name": "Ada"});

    let out = veneer.render_sync("Hi {{name}}", Some(&data), Some("handlebars"), None, None);
    assert_eq!(out, "Hi Ada");

    let out = veneer.render_sync("<%= name %>", Some(&data), None, None, None);
    assert_eq!(out, "Ada");
}

#[test]
fn sync_failures_degrade_the_same_way() {
    let mut veneer = Veneer::new();
    let errors = error_counter(&mut veneer);

    let out = veneer.render_sync("p Hello", None, Some("pug"), None, None);

    assert_eq!(out, "");
    assert_eq!(errors.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn front_matter_surface_round_trips() {
    let veneer = Veneer::new();
    let document = "---\ntitle: Doc\n---\n# Body\n";

    assert!(veneer.has_front_matter(document));
    assert_eq!(veneer.front_matter(document).unwrap()["title"], "Doc");

    let stripped = veneer.remove_front_matter(document);
    assert!(!veneer.has_front_matter(&stripped));

    let updated = veneer.set_front_matter(&stripped, &json!({"title": "Updated"}));
    assert_eq!(veneer.front_matter(&updated).unwrap()["title"], "Updated");
}
