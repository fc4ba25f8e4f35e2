//! String-level edits to the SPA's HTML shell.
//!
//! Every function here is pure: it takes a document and returns a new one.
//! Missing anchors (no `</head>`, no empty mount element) degrade to returning
//! the input unchanged instead of failing. Callers never build tag regexes
//! themselves; all tag matching lives in this module.
//!
//! Upserts are keyed by tag identity (`name=`, `property=`, `rel="canonical"`),
//! so applying the same edit twice yields the same document.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Empty SPA mount point. Only this exact pattern is replaced.
pub const ROOT_MOUNT: &str = r#"<div id="root"></div>"#;

static HEAD_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</head\s*>").expect("static regex"));

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>.*?</title\s*>").expect("static regex"));

static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<link\b[^>]*\brel\s*=\s*["']canonical["'][^>]*>"#).expect("static regex")
});

/// Escapes `& < > " '` for use in attribute values and text nodes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes `value` for embedding inside a `<script>` element.
///
/// `<` is written as `\u003c`, which keeps the payload valid JSON while making
/// `</script>` and `<!--` impossible inside it.
pub fn script_json(value: &Value) -> String {
    // Serializing a `Value` cannot fail: keys are always strings.
    serde_json::to_string(value)
        .unwrap_or_default()
        .replace('<', "\\u003c")
}

/// Upserts `<meta name="{name}" content="{content}" />`. Name match is
/// case-insensitive.
pub fn upsert_meta_by_name(html: &str, name: &str, content: &str) -> String {
    upsert_meta(html, "name", name, content)
}

/// Upserts `<meta property="{property}" content="{content}" />`, used for
/// Open Graph tags.
pub fn upsert_meta_by_property(html: &str, property: &str, content: &str) -> String {
    upsert_meta(html, "property", property, content)
}

fn upsert_meta(html: &str, attr: &str, key: &str, content: &str) -> String {
    let tag = format!(
        r#"<meta {attr}="{}" content="{}" />"#,
        escape(key),
        escape(content)
    );
    let pattern = format!(
        r#"(?is)<meta\b[^>]*\b{attr}\s*=\s*["']{}["'][^>]*>"#,
        regex::escape(key)
    );
    match Regex::new(&pattern) {
        Ok(re) => upsert(html, &re, &tag),
        Err(_) => inject_into_head(html, &tag),
    }
}

/// Upserts `<link rel="canonical" href="{href}" />`.
pub fn upsert_canonical(html: &str, href: &str) -> String {
    let tag = format!(r#"<link rel="canonical" href="{}" />"#, escape(href));
    upsert(html, &CANONICAL, &tag)
}

/// Replaces the `<title>` element, or inserts one into `<head>`.
pub fn replace_title(html: &str, title: &str) -> String {
    let tag = format!("<title>{}</title>", escape(title));
    upsert(html, &TITLE, &tag)
}

/// Inserts `fragment` immediately before `</head>`. Without a closing head
/// tag the document is returned unchanged.
pub fn inject_into_head(html: &str, fragment: &str) -> String {
    match HEAD_CLOSE.find(html) {
        Some(m) => {
            let mut out = String::with_capacity(html.len() + fragment.len() + 1);
            out.push_str(&html[..m.start()]);
            out.push_str(fragment);
            out.push('\n');
            out.push_str(&html[m.start()..]);
            out
        }
        None => html.to_owned(),
    }
}

/// Fills the empty SPA mount element with `inner`.
///
/// Known limitation: a template whose mount element already has children is
/// left untouched.
pub fn replace_root(html: &str, inner: &str) -> String {
    html.replacen(ROOT_MOUNT, &format!(r#"<div id="root">{inner}</div>"#), 1)
}

/// Replaces the first match of `re` with `tag` and drops any later
/// duplicates; inserts into `<head>` when nothing matches.
///
/// Only the head section (everything before `</head>`) is searched, so
/// same-named elements in the body, like inline SVG `<title>`s, survive.
/// A document without `</head>` is searched whole.
fn upsert(html: &str, re: &Regex, tag: &str) -> String {
    let head_end = HEAD_CLOSE.find(html).map_or(html.len(), |m| m.start());
    let (head, rest) = html.split_at(head_end);
    if !re.is_match(head) {
        return inject_into_head(html, tag);
    }
    let mut first = true;
    let head = re.replace_all(head, |_: &regex::Captures<'_>| {
        if std::mem::take(&mut first) {
            tag.to_owned()
        } else {
            String::new()
        }
    });
    let mut out = String::with_capacity(head.len() + rest.len());
    out.push_str(&head);
    out.push_str(rest);
    out
}
