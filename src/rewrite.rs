//! Text transforms behind the `/robots.txt` and `/sitemap.xml` edge routes.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

/// Served when the upstream robots file is unavailable.
pub const DEFAULT_ROBOTS: &str = "User-agent: *\nAllow: /\n";

/// Public origin used when neither an override nor a `Host` header exists.
pub const FALLBACK_FRONTEND_BASE: &str = "https://www.creatorhub.example";

static SITEMAP_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*sitemap\s*:").expect("static regex"));

static LOC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<loc>(.*?)</loc>").expect("static regex"));

/// Override, then `https://{host}`, then [`FALLBACK_FRONTEND_BASE`].
pub fn resolve_frontend_base(explicit: Option<&str>, host: Option<&str>) -> String {
    if let Some(base) = explicit.map(|b| b.trim().trim_end_matches('/')).filter(|b| !b.is_empty()) {
        return base.to_owned();
    }
    match host.map(str::trim).filter(|h| !h.is_empty()) {
        Some(host) => format!("https://{host}"),
        None => FALLBACK_FRONTEND_BASE.to_owned(),
    }
}

/// Drops every `Sitemap:` directive and appends exactly one pointing at
/// `{frontend_base}/sitemap.xml`.
pub fn rewrite_robots(body: &str, frontend_base: &str) -> String {
    let kept: Vec<&str> = body
        .lines()
        .filter(|line| !SITEMAP_DIRECTIVE.is_match(line))
        .collect();

    let mut out = kept.join("\n").trim_end().to_owned();
    if !out.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str(&format!("Sitemap: {frontend_base}/sitemap.xml\n"));
    out
}

/// Rebases every `<loc>` onto `frontend_base`. Bytes outside `<loc>` elements
/// are left exactly as received.
pub fn rewrite_sitemap(xml: &str, frontend_base: &str) -> String {
    LOC.replace_all(xml, |caps: &Captures<'_>| {
        format!("<loc>{}</loc>", rebase_url(&caps[1], frontend_base))
    })
    .into_owned()
}

/// Absolute http(s) URLs keep their path and query under the new origin.
/// Unparseable values are treated as paths: root-relative ones get the
/// origin prefixed, anything else is returned unchanged.
pub fn rebase_url(loc: &str, frontend_base: &str) -> String {
    let trimmed = loc.trim();
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            let mut out = format!("{frontend_base}{}", url.path());
            if let Some(query) = url.query() {
                out.push('?');
                out.push_str(query);
            }
            out
        }
        Ok(_) => loc.to_owned(),
        Err(_) if trimmed.starts_with('/') => format!("{frontend_base}{trimmed}"),
        Err(_) => loc.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW: &str = "https://new.example.com";

    #[test]
    fn frontend_base_resolution_order() {
        assert_eq!(resolve_frontend_base(Some("https://o.example/"), Some("h.example")), "https://o.example");
        assert_eq!(resolve_frontend_base(Some(" "), Some("h.example:8443")), "https://h.example:8443");
        assert_eq!(resolve_frontend_base(None, None), FALLBACK_FRONTEND_BASE);
    }

    #[test]
    fn robots_keeps_exactly_one_sitemap_line() {
        let upstream = "User-agent: *\nDisallow: /admin\nSitemap: https://api.example.com/sitemap.xml\n  sitemap :https://api.example.com/s2.xml\n";
        let out = rewrite_robots(upstream, NEW);
        assert_eq!(out.to_ascii_lowercase().matches("sitemap:").count(), 1);
        assert_eq!(
            out,
            "User-agent: *\nDisallow: /admin\n\nSitemap: https://new.example.com/sitemap.xml\n"
        );
    }

    #[test]
    fn robots_default_body_gains_sitemap() {
        let out = rewrite_robots(DEFAULT_ROBOTS, NEW);
        assert!(out.starts_with("User-agent: *\nAllow: /\n"));
        assert!(out.ends_with("Sitemap: https://new.example.com/sitemap.xml\n"));
    }

    #[test]
    fn robots_with_only_sitemaps_becomes_single_line() {
        let out = rewrite_robots("Sitemap: a\r\nSITEMAP: b\r\n", NEW);
        assert_eq!(out, "Sitemap: https://new.example.com/sitemap.xml\n");
    }

    #[test]
    fn sitemap_host_is_rewritten_once() {
        let xml = "<?xml version=\"1.0\"?><urlset><url><loc>https://old.example.com/foo?x=1</loc>\
                   <lastmod>2024-01-01</lastmod></url><url><loc>/bar</loc></url>\
                   <url><loc>relative/baz</loc></url></urlset>";
        let out = rewrite_sitemap(xml, NEW);
        assert_eq!(out.matches("<loc>https://new.example.com/foo?x=1</loc>").count(), 1);
        assert!(out.contains("<loc>https://new.example.com/bar</loc>"));
        assert!(out.contains("<loc>relative/baz</loc>"));
        assert!(out.contains("<lastmod>2024-01-01</lastmod>"));
        assert!(!out.contains("old.example.com"));
    }

    #[test]
    fn sitemap_outside_loc_is_untouched() {
        let xml = "<urlset>\n  <url>\n    <loc>\n      https://old.example.com/a\n    </loc>\n  </url>\n</urlset>\n";
        let out = rewrite_sitemap(xml, NEW);
        assert_eq!(out, "<urlset>\n  <url>\n    <loc>https://new.example.com/a</loc>\n  </url>\n</urlset>\n");
    }

    #[test]
    fn sitemap_index_locs_are_rebased() {
        let xml = "<sitemapindex><sitemap><loc>https://api.example.com/sitemap-creators.xml</loc></sitemap></sitemapindex>";
        assert!(rewrite_sitemap(xml, NEW).contains("<loc>https://new.example.com/sitemap-creators.xml</loc>"));
    }

    #[test]
    fn non_http_schemes_are_left_alone() {
        assert_eq!(rebase_url("mailto:a@b.c", NEW), "mailto:a@b.c");
        assert_eq!(rebase_url("https://old.example.com", NEW), "https://new.example.com/");
    }
}
