//! Heuristic dialect sniffing.
//!
//! [`detect`] inspects raw template text and guesses which dialect wrote it.
//! Several dialects share surface syntax: `{{ }}` appears in Handlebars,
//! Mustache, Nunjucks, and Liquid, while indentation-led markup shows up in
//! both Pug and Markdown. The rules therefore run as an ordered chain and
//! the first match wins. The chain goes from the least ambiguous signal (EJS's
//! `<%` never collides with brace dialects) to the most ambiguous (bare
//! `{{ }}` interpolation), with the structural heuristics (Pug, Markdown)
//! only consulted once delimiter-based dialects are ruled out. The order is
//! part of the contract; reordering it changes results on mixed inputs.
//!
//! This is best-effort classification, not a grammar decision procedure:
//! adversarial or deeply ambiguous inputs may be misread, and plain prose
//! starting with a word that doubles as an HTML tag name can be taken for
//! Pug. Callers needing certainty should name the dialect explicitly.

use std::sync::LazyLock;

use regex::Regex;

use crate::engines::EngineName;

/// Tag names (plus `each`/`mixin`) accepted at the start of a Pug line.
/// Deliberately excludes short words that double as English prose starters
/// (`b`, `i`, `code`, `if`, ...) to keep plain text out of the Pug bucket;
/// real Pug documents carry plenty of other matching lines.
const PUG_LINE_WORDS: &str = "doctype|html|head|title|body|div|span|p|a|ul|ol|li|dl|dt|dd|table|thead|tbody|tfoot|tr|td|th|img|br|hr|h1|h2|h3|h4|h5|h6|header|footer|section|article|nav|main|aside|form|input|button|label|select|option|textarea|script|link|meta|style|blockquote|figure|figcaption|video|audio|canvas|iframe|each|mixin";

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>").expect("valid regex")
});

static PUG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{PUG_LINE_WORDS})(?:[.#][A-Za-z0-9_-]+)*(?:\([^)]*\))?(?:[.=]|\s|$)"
    ))
    .expect("valid regex")
});

static EJS_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<%[-=_#]?.*?%>").expect("valid regex"));

static LIQUID_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{%-?\s*(?:liquid|assign|capture|endcapture|case|when|unless|endunless|tablerow|endtablerow|increment|decrement)\b",
    )
    .expect("valid regex")
});

static PIPE_FILTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]*\|[^{}]*\}\}").expect("valid regex"));

static NUNJUCKS_EXCLUSIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{%-?\s*(?:block|extends|macro|import|call)\b").expect("valid regex")
});

static NUNJUCKS_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{%-?\s*(?:block|extends|include|import|for|if|elif|else|endif|endfor|set|macro|endmacro|call)\b",
    )
    .expect("valid regex")
});

static HBS_BLOCK_HELPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{#(?:if|each|unless|with|lookup|log)\b").expect("valid regex")
});

static HBS_CLOSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{/[A-Za-z]").expect("valid regex"));

static HBS_PARTIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{>\s*\S").expect("valid regex"));

static HBS_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{!").expect("valid regex"));

static BRACE_INTERPOLATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]+\}\}").expect("valid regex"));

static MD_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*#{1,6}\s+\S").expect("valid regex"));
static MD_UNORDERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*+]\s+\S").expect("valid regex"));
static MD_ORDERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s+\S").expect("valid regex"));
static MD_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*```").expect("valid regex"));
static MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\([^)]*\)").expect("valid regex"));
static MD_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid regex"));
static MD_BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*>\s").expect("valid regex"));
static MD_TABLE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\|.+\|").expect("valid regex"));

/// Guess the dialect of a raw template. `None` means no rule matched.
pub fn detect(source: &str) -> Option<EngineName> {
    if source.trim().is_empty() {
        return None;
    }

    if looks_like_pug(source) {
        return Some(EngineName::Pug);
    }

    if EJS_PAIR.is_match(source) {
        return Some(EngineName::Ejs);
    }

    // Liquid before Nunjucks: both use {% %}, but the keywords here exist
    // only in Liquid, and pipe filters count only when no Nunjucks-exclusive
    // tag contradicts them. Templates with neither signal fall through and
    // resolve in Nunjucks's favor.
    if LIQUID_KEYWORD.is_match(source)
        || (PIPE_FILTER.is_match(source) && !NUNJUCKS_EXCLUSIVE.is_match(source))
    {
        return Some(EngineName::Liquid);
    }

    if NUNJUCKS_TAG.is_match(source) {
        return Some(EngineName::Nunjucks);
    }

    if HBS_BLOCK_HELPER.is_match(source)
        || HBS_CLOSING.is_match(source)
        || HBS_PARTIAL.is_match(source)
        || HBS_COMMENT.is_match(source)
    {
        return Some(EngineName::Handlebars);
    }

    // Bare {{ }} with no {% %} anywhere: plain interpolation. Handlebars is
    // the superset dialect in this facade, so it wins over Mustache.
    if BRACE_INTERPOLATION.is_match(source) && !source.contains("{%") {
        return Some(EngineName::Handlebars);
    }

    if looks_like_markdown(source) {
        return Some(EngineName::Markdown);
    }

    None
}

/// A line consisting of a bare tag name (optionally with `.class`, `#id`,
/// or `(attrs)`) reads as Pug, but any literal HTML tag anywhere vetoes it.
fn looks_like_pug(source: &str) -> bool {
    if HTML_TAG.is_match(source) {
        return false;
    }
    source.lines().any(|line| PUG_LINE.is_match(line.trim()))
}

/// Markdown needs at least one structural marker and must be free of
/// template delimiters; HTML tags only disqualify it when they appear
/// outside fenced code blocks.
fn looks_like_markdown(source: &str) -> bool {
    let has_marker = MD_HEADING.is_match(source)
        || MD_UNORDERED_LIST.is_match(source)
        || MD_ORDERED_LIST.is_match(source)
        || MD_FENCE.is_match(source)
        || MD_IMAGE.is_match(source)
        || MD_LINK.is_match(source)
        || MD_BLOCKQUOTE.is_match(source)
        || MD_TABLE_ROW.is_match(source);
    if !has_marker {
        return false;
    }

    if source.contains("<%") || source.contains("{{") || source.contains("{%") {
        return false;
    }

    !HTML_TAG.is_match(&strip_fenced_blocks(source))
}

/// Drop the contents of ``` fenced blocks, keeping everything else.
fn strip_fenced_blocks(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut in_fence = false;
    for line in source.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if !in_fence {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
