//! Unified error type.

use std::path::PathBuf;

use thiserror::Error;

/// The error type returned by crawlfront's fallible operations.
///
/// Edge handlers never surface this to hyper: robots failures become the
/// permissive default body and sitemap failures become `500` responses. In the
/// prerender pipeline the orchestrator decides per step whether an `Error`
/// aborts the run or only the current item.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream {url} returned status {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("template not found at {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("invalid socket address `{0}`")]
    InvalidAddr(String),
}
