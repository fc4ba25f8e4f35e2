//! `/robots.txt` and `/sitemap.xml`, proxied from the backend and rewritten
//! for the public domain.
//!
//! The two handlers treat upstream failure differently. Robots masks it with
//! a permissive default so crawlers are never locked out. Sitemap passes the
//! upstream status through, and answers `500` on transport or internal
//! failure, so a broken sitemap stays visible.

use std::sync::Arc;

use http::StatusCode;
use tracing::{debug, warn};

use crate::config::EdgeConfig;
use crate::error::Error;
use crate::health;
use crate::request::Request;
use crate::response::{ContentType, Response};
use crate::rewrite::{self, DEFAULT_ROBOTS};
use crate::router::Router;

/// Sent on every successful robots/sitemap response.
pub const CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

/// Shared, read-only state for the edge handlers.
pub struct EdgeState {
    client: reqwest::Client,
    config: EdgeConfig,
}

impl EdgeState {
    pub fn new(config: EdgeConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("crawlfront-edge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    fn frontend_base(&self, req: &Request) -> String {
        rewrite::resolve_frontend_base(self.config.frontend_base.as_deref(), req.host())
    }

    /// One upstream GET, no retry. Returns the status and body whatever the
    /// status is; only transport failures are errors.
    async fn fetch(&self, url: &str) -> Result<(StatusCode, String), Error> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok((status, body))
    }
}

/// Routes served by `crawlfront serve`.
pub fn router(state: Arc<EdgeState>) -> Router {
    let robots_state = Arc::clone(&state);
    let sitemap_state = state;
    Router::new()
        .get("/robots.txt", move |req| robots(Arc::clone(&robots_state), req))
        .get("/sitemap.xml", move |req| sitemap(Arc::clone(&sitemap_state), req))
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}

/// Always `200 text/plain`: upstream body (or the permissive default) with
/// its `Sitemap:` lines replaced by one pointing at the public sitemap.
pub async fn robots(state: Arc<EdgeState>, req: Request) -> Response {
    let base = state.frontend_base(&req);
    let upstream = match state.config.robots_upstream.as_deref() {
        Some(url) => match state.fetch(url).await {
            Ok((status, body)) if status.is_success() => body,
            Ok((status, _)) => {
                warn!(%url, status = status.as_u16(), "upstream robots not ok, serving default");
                DEFAULT_ROBOTS.to_owned()
            }
            Err(e) => {
                warn!(%url, error = %e, "upstream robots fetch failed, serving default");
                DEFAULT_ROBOTS.to_owned()
            }
        },
        None => {
            debug!("no robots upstream configured, serving default");
            DEFAULT_ROBOTS.to_owned()
        }
    };

    Response::builder()
        .header("cache-control", CACHE_CONTROL)
        .text(rewrite::rewrite_robots(&upstream, &base))
}

/// Upstream sitemap with every `<loc>` rebased onto the public origin.
pub async fn sitemap(state: Arc<EdgeState>, req: Request) -> Response {
    let Some(url) = state.config.sitemap_upstream.as_deref() else {
        warn!("sitemap requested but no upstream is configured");
        return internal_error("sitemap upstream not configured");
    };

    match state.fetch(url).await {
        Ok((status, body)) if status.is_success() => {
            let base = state.frontend_base(&req);
            Response::builder()
                .header("cache-control", CACHE_CONTROL)
                .bytes(ContentType::Xml, rewrite::rewrite_sitemap(&body, &base).into_bytes())
        }
        Ok((status, _)) => {
            warn!(%url, status = status.as_u16(), "upstream sitemap not ok");
            Response::builder()
                .status(status)
                .text(format!("upstream sitemap returned {}", status.as_u16()))
        }
        Err(e) => {
            warn!(%url, error = %e, "upstream sitemap fetch failed");
            internal_error(&format!("sitemap error: {e}"))
        }
    }
}

fn internal_error(message: &str) -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .text(message)
}
