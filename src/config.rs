//! Process configuration.
//!
//! Everything environment-derived is read exactly once, by clap, when the
//! binary starts. The resulting [`Config`] / [`EdgeConfig`] values are passed
//! by reference into every component; nothing below `main` calls
//! `std::env::var`.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

/// Cap shared by the creators-list cards and the `ItemList` JSON-LD payload.
pub const DEFAULT_LIST_CAP: usize = 60;

/// Page size requested from `/public/influencers`.
pub const DEFAULT_PAGE_SIZE: usize = 200;

/// Applied to every upstream fetch, prerender and edge alike.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Prerender configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Backend origin. `None` disables influencer prerendering.
    pub api_base: Option<String>,
    /// Public origin used for canonical, Open Graph and JSON-LD URLs.
    pub frontend_base: Option<String>,
    pub out_dir: PathBuf,
    pub template: PathBuf,
    pub page_size: usize,
    pub list_cap: usize,
    pub timeout: Duration,
}

impl Config {
    /// Defaults for everything except the output directory; the template is
    /// the SPA shell already sitting in `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        let out_dir = out_dir.into();
        Self {
            api_base: None,
            frontend_base: None,
            template: out_dir.join("index.html"),
            out_dir,
            page_size: DEFAULT_PAGE_SIZE,
            list_cap: DEFAULT_LIST_CAP,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = normalize_base(Some(base));
        self
    }

    pub fn with_frontend_base(mut self, base: &str) -> Self {
        self.frontend_base = normalize_base(Some(base));
        self
    }

    pub fn frontend_base(&self) -> Option<&str> {
        self.frontend_base.as_deref()
    }
}

/// Edge server configuration.
#[derive(Clone, Debug)]
pub struct EdgeConfig {
    /// Explicit public origin. Falls back to the request `Host`, then to
    /// [`crate::rewrite::FALLBACK_FRONTEND_BASE`].
    pub frontend_base: Option<String>,
    pub robots_upstream: Option<String>,
    pub sitemap_upstream: Option<String>,
    pub timeout: Duration,
}

/// Trims whitespace and trailing slashes; blank values count as absent.
pub fn normalize_base(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

// ── CLI surface ───────────────────────────────────────────────────────────────

/// Options shared by both subcommands.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Backend origin for data and upstream robots/sitemap fetches
    #[arg(long, env = "API_BASE_URL")]
    pub api_base: Option<String>,

    /// Public origin used to build absolute canonical/OG/sitemap URLs
    #[arg(long, env = "FRONTEND_BASE_URL")]
    pub frontend_base: Option<String>,

    /// Timeout for each upstream fetch, in milliseconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_MS", default_value_t = 8000)]
    pub timeout_ms: u64,
}

/// `crawlfront prerender` options.
#[derive(Args, Debug, Clone)]
pub struct PrerenderArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory holding the built SPA; pages are written beneath it
    #[arg(long, env = "PRERENDER_OUT_DIR", default_value = "dist")]
    pub out_dir: PathBuf,

    /// HTML shell to clone for every route (defaults to <out-dir>/index.html)
    #[arg(long, env = "PRERENDER_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Number of influencers requested from the list endpoint
    #[arg(long, env = "PRERENDER_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Maximum creators shown on /creators and in its ItemList
    #[arg(long, env = "PRERENDER_LIST_CAP", default_value_t = DEFAULT_LIST_CAP)]
    pub list_cap: usize,
}

impl PrerenderArgs {
    pub fn build_config(&self) -> Config {
        let template = self
            .template
            .clone()
            .unwrap_or_else(|| self.out_dir.join("index.html"));
        Config {
            api_base: normalize_base(self.common.api_base.as_deref()),
            frontend_base: normalize_base(self.common.frontend_base.as_deref()),
            out_dir: self.out_dir.clone(),
            template,
            page_size: self.page_size,
            list_cap: self.list_cap,
            timeout: Duration::from_millis(self.common.timeout_ms),
        }
    }
}

/// `crawlfront serve` options.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Address the edge server listens on
    #[arg(long, env = "EDGE_BIND", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// Upstream robots.txt (defaults to <api-base>/robots.txt)
    #[arg(long, env = "ROBOTS_UPSTREAM_URL")]
    pub robots_upstream: Option<String>,

    /// Upstream sitemap.xml (defaults to <api-base>/sitemap.xml)
    #[arg(long, env = "SITEMAP_UPSTREAM_URL")]
    pub sitemap_upstream: Option<String>,
}

impl ServeArgs {
    pub fn build_config(&self) -> EdgeConfig {
        let api_base = normalize_base(self.common.api_base.as_deref());
        let upstream = |explicit: &Option<String>, file: &str| {
            normalize_base(explicit.as_deref())
                .or_else(|| api_base.as_ref().map(|base| format!("{base}/{file}")))
        };
        EdgeConfig {
            frontend_base: normalize_base(self.common.frontend_base.as_deref()),
            robots_upstream: upstream(&self.robots_upstream, "robots.txt"),
            sitemap_upstream: upstream(&self.sitemap_upstream, "sitemap.xml"),
            timeout: Duration::from_millis(self.common.timeout_ms),
        }
    }
}
