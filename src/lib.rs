//! # crawlfront
//!
//! Crawler-facing plumbing for the CreatorHub marketplace SPA.
//!
//! ## The contract
//!
//! The SPA renders everything in the browser, which leaves crawlers with an
//! empty `<div id="root">`. crawlfront covers the two places where that
//! matters:
//!
//! - **Prerendering**: at build time, fetch creators from the backend and
//!   stamp out one `index.html` per route with title, canonical, Open Graph,
//!   Twitter card and JSON-LD metadata plus server-rendered body markup.
//! - **Edge rewriting**: serve `/robots.txt` and `/sitemap.xml` from the
//!   backend, rewritten so every URL points at the public domain.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use crawlfront::{Config, prerender};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), crawlfront::Error> {
//!     let config = Config::new("dist")
//!         .with_api_base("https://api.example.com")
//!         .with_frontend_base("https://app.example.com");
//!     let report = prerender::run(&config).await?;
//!     println!("{} creator pages", report.profiles_written);
//!     Ok(())
//! }
//! ```
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use crawlfront::{EdgeConfig, Server, edge};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), crawlfront::Error> {
//!     let state = edge::EdgeState::new(EdgeConfig {
//!         frontend_base: Some("https://app.example.com".into()),
//!         robots_upstream: Some("https://api.example.com/robots.txt".into()),
//!         sitemap_upstream: Some("https://api.example.com/sitemap.xml".into()),
//!         timeout: Duration::from_secs(8),
//!     })?;
//!     Server::bind("0.0.0.0:3000")?.serve(edge::router(Arc::new(state))).await
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod api;
pub mod config;
pub mod edge;
pub mod health;
pub mod html;
pub mod normalize;
pub mod pages;
pub mod prerender;
pub mod rewrite;
pub mod schema;
pub mod writer;

pub use config::{Config, EdgeConfig};
pub use error::Error;
pub use handler::Handler;
pub use normalize::{InfluencerRecord, Verification};
pub use prerender::PrerenderReport;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response};
pub use router::Router;
pub use server::{Server, serve_listener};
pub use writer::{OgType, RouteWriter, SeoPageSpec};
