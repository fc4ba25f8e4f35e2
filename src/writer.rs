//! Route writer: one [`SeoPageSpec`] in, one `index.html` out.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::html;

/// Used for `og:title`/`twitter:title` when a page supplies no title.
pub const DEFAULT_TITLE: &str = "CreatorHub | Influencer Marketing Marketplace";

/// Used when a page supplies no description.
pub const DEFAULT_DESCRIPTION: &str =
    "Discover creators, collaborate with brands and run influencer campaigns on CreatorHub.";

/// Brand asset used as `og:image` when a page has none.
pub const DEFAULT_OG_IMAGE: &str = "/logo.png";

/// Global the SPA reads on boot to skip its first fetch.
pub const WINDOW_DATA_GLOBAL: &str = "__PRERENDER_DATA__";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OgType {
    #[default]
    Website,
    Profile,
}

impl OgType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Profile => "profile",
        }
    }
}

/// Everything the writer needs to stamp out one route.
#[derive(Clone, Debug, Default)]
pub struct SeoPageSpec {
    /// Leading slash; trailing slash optional.
    pub route: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub og_image: Option<String>,
    pub og_type: OgType,
    /// JSON-LD payload.
    pub schema: Option<Value>,
    /// Server-rendered markup for the SPA mount point.
    pub body_html: Option<String>,
    /// Hydration data exposed as `window.__PRERENDER_DATA__`.
    pub window_data: Option<Value>,
}

impl SeoPageSpec {
    pub fn new(route: impl Into<String>) -> Self {
        Self { route: route.into(), ..Self::default() }
    }
}

/// Clones the template once per route and applies the HTML transforms.
pub struct RouteWriter {
    template: String,
    out_dir: PathBuf,
    frontend_base: Option<String>,
}

impl RouteWriter {
    pub fn new(template: String, out_dir: impl Into<PathBuf>, frontend_base: Option<String>) -> Self {
        Self { template, out_dir: out_dir.into(), frontend_base }
    }

    /// Reads the template named by `config` into memory. The template is
    /// usually `<out_dir>/index.html`, so it must be loaded before any route
    /// (the root route included) is written.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let template = fs::read_to_string(&config.template).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::MissingTemplate(config.template.clone()),
            _ => Error::Io(e),
        })?;
        Ok(Self::new(template, &config.out_dir, config.frontend_base.clone()))
    }

    /// Produces the final document for `spec` without touching the disk.
    /// Deterministic: the same spec always renders the same bytes.
    pub fn render(&self, spec: &SeoPageSpec) -> String {
        let base = self.frontend_base.as_deref();
        let mut doc = self.template.clone();

        let title = non_empty(&spec.title);
        if let Some(title) = title {
            doc = html::replace_title(&doc, title);
        }
        let title = title.unwrap_or(DEFAULT_TITLE);
        let description = non_empty(&spec.description).unwrap_or(DEFAULT_DESCRIPTION);
        doc = html::upsert_meta_by_name(&doc, "description", description);

        let canonical = non_empty(&spec.canonical)
            .map(str::to_owned)
            .or_else(|| base.map(|b| format!("{b}{}", spec.route)));
        if let Some(href) = &canonical {
            doc = html::upsert_canonical(&doc, href);
            doc = html::upsert_meta_by_property(&doc, "og:url", href);
        }

        let image = to_absolute(base, non_empty(&spec.og_image).unwrap_or(DEFAULT_OG_IMAGE));
        doc = html::upsert_meta_by_property(&doc, "og:type", spec.og_type.as_str());
        doc = html::upsert_meta_by_property(&doc, "og:title", title);
        doc = html::upsert_meta_by_property(&doc, "og:description", description);
        doc = html::upsert_meta_by_property(&doc, "og:image", &image);

        doc = html::upsert_meta_by_name(&doc, "twitter:card", "summary_large_image");
        doc = html::upsert_meta_by_name(&doc, "twitter:title", title);
        doc = html::upsert_meta_by_name(&doc, "twitter:description", description);
        doc = html::upsert_meta_by_name(&doc, "twitter:image", &image);

        if let Some(schema) = &spec.schema {
            doc = html::inject_into_head(
                &doc,
                &format!(
                    r#"<script type="application/ld+json">{}</script>"#,
                    html::script_json(schema)
                ),
            );
        }
        if let Some(data) = &spec.window_data {
            doc = html::inject_into_head(
                &doc,
                &format!(
                    "<script>window.{WINDOW_DATA_GLOBAL} = {};</script>",
                    html::script_json(data)
                ),
            );
        }
        if let Some(body) = &spec.body_html {
            doc = html::replace_root(&doc, body);
        }
        doc
    }

    /// Renders `spec` and writes it to `<out_dir>/<route>/index.html`,
    /// creating directories as needed. Returns the written path.
    pub fn write(&self, spec: &SeoPageSpec) -> Result<PathBuf, Error> {
        let dir = route_dir(&self.out_dir, &spec.route);
        fs::create_dir_all(&dir)?;
        let path = dir.join("index.html");
        fs::write(&path, self.render(spec))?;
        debug!(route = %spec.route, path = %path.display(), "route written");
        Ok(path)
    }
}

/// Directory for `route` under `out_dir`. The root route maps to `out_dir`
/// itself; `.`/`..` and empty segments are discarded so a hostile slug cannot
/// escape the output tree.
pub fn route_dir(out_dir: &Path, route: &str) -> PathBuf {
    let mut dir = out_dir.to_path_buf();
    for segment in route.split('/') {
        let mut parts = Path::new(segment).components();
        if let (Some(Component::Normal(part)), None) = (parts.next(), parts.next()) {
            dir.push(part);
        }
    }
    dir
}

/// Absolute http(s) URLs pass through; root-relative paths are prefixed with
/// the frontend base when one is configured.
pub fn to_absolute(frontend_base: Option<&str>, url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return url.to_owned();
    }
    match frontend_base {
        Some(base) if url.starts_with('/') => format!("{base}{url}"),
        _ => url.to_owned(),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEMPLATE: &str = "<!doctype html><html><head><title>CreatorHub</title>\n\
        <meta name=\"description\" content=\"SPA\">\n</head>\
        <body><div id=\"root\"></div><script src=\"/app.js\"></script></body></html>";

    fn writer(dir: &Path, base: Option<&str>) -> RouteWriter {
        RouteWriter::new(TEMPLATE.to_owned(), dir, base.map(str::to_owned))
    }

    #[test]
    fn route_dirs_strip_slashes_and_dot_segments() {
        let out = Path::new("dist");
        assert_eq!(route_dir(out, "/"), PathBuf::from("dist"));
        assert_eq!(route_dir(out, ""), PathBuf::from("dist"));
        assert_eq!(route_dir(out, "/creators/"), PathBuf::from("dist/creators"));
        assert_eq!(route_dir(out, "/creators/jane"), PathBuf::from("dist/creators/jane"));
        assert_eq!(route_dir(out, "/creators/../../etc"), PathBuf::from("dist/creators/etc"));
    }

    #[test]
    fn to_absolute_rules() {
        let base = Some("https://app.example.com");
        assert_eq!(to_absolute(base, "https://cdn.x/a.png"), "https://cdn.x/a.png");
        assert_eq!(to_absolute(base, "/logo.png"), "https://app.example.com/logo.png");
        assert_eq!(to_absolute(None, "/logo.png"), "/logo.png");
        assert_eq!(to_absolute(base, "img/a.png"), "img/a.png");
    }

    #[test]
    fn canonical_falls_back_to_base_plus_route() {
        let dir = tempfile::tempdir().unwrap();
        let page = writer(dir.path(), Some("https://app.example.com"))
            .render(&SeoPageSpec::new("/about"));
        assert!(page.contains(r#"<link rel="canonical" href="https://app.example.com/about" />"#));
        assert!(page.contains(r#"<meta property="og:url" content="https://app.example.com/about" />"#));
    }

    #[test]
    fn no_base_and_no_canonical_omits_the_tag() {
        let dir = tempfile::tempdir().unwrap();
        let page = writer(dir.path(), None).render(&SeoPageSpec::new("/about"));
        assert!(!page.contains("rel=\"canonical\""));
        assert!(page.contains(r#"<meta property="og:image" content="/logo.png" />"#));
    }

    #[test]
    fn defaults_keep_template_title_but_fill_meta() {
        let dir = tempfile::tempdir().unwrap();
        let page = writer(dir.path(), None).render(&SeoPageSpec::new("/x"));
        assert!(page.contains("<title>CreatorHub</title>"));
        assert!(page.contains(&format!(
            r#"<meta property="og:title" content="{}" />"#,
            html::escape(DEFAULT_TITLE)
        )));
        assert!(page.contains(r#"<meta name="twitter:card" content="summary_large_image" />"#));
        assert!(page.contains(r#"<meta property="og:type" content="website" />"#));
    }

    #[test]
    fn scripts_and_body_are_injected() {
        let dir = tempfile::tempdir().unwrap();
        let spec = SeoPageSpec {
            title: Some("Jane".into()),
            og_type: OgType::Profile,
            og_image: Some("/img/jane.png".into()),
            schema: Some(json!({ "@type": "Person", "name": "</script>" })),
            window_data: Some(json!({ "slug": "jane" })),
            body_html: Some("<h1>Jane</h1>".into()),
            ..SeoPageSpec::new("/creators/jane")
        };
        let page = writer(dir.path(), Some("https://app.example.com")).render(&spec);
        assert!(page.contains("<title>Jane</title>"));
        assert!(page.contains(r#"<meta property="og:type" content="profile" />"#));
        assert!(page.contains(r#"content="https://app.example.com/img/jane.png""#));
        assert!(page.contains(r#"<script type="application/ld+json">{"@type":"Person","name":"\u003c/script>"}</script>"#));
        assert!(page.contains(r#"<script>window.__PRERENDER_DATA__ = {"slug":"jane"};</script>"#));
        assert!(page.contains(r#"<div id="root"><h1>Jane</h1></div>"#));
        assert_eq!(page.matches("</script>").count(), 3);
    }

    #[test]
    fn writing_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let w = writer(dir.path(), Some("https://app.example.com"));
        let spec = SeoPageSpec {
            title: Some("About".into()),
            body_html: Some("<p>hi</p>".into()),
            ..SeoPageSpec::new("/about")
        };
        let path = w.write(&spec).unwrap();
        let first = fs::read(&path).unwrap();
        let again = w.write(&spec).unwrap();
        assert_eq!(path, again);
        assert_eq!(first, fs::read(&again).unwrap());
        assert_eq!(path, dir.path().join("about").join("index.html"));
    }

    #[test]
    fn root_route_writes_into_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = writer(dir.path(), None).write(&SeoPageSpec::new("/")).unwrap();
        assert_eq!(path, dir.path().join("index.html"));
    }

    #[test]
    fn missing_template_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        assert!(matches!(RouteWriter::from_config(&config), Err(Error::MissingTemplate(_))));
    }
}
