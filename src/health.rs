//! Liveness and readiness probes for the edge server.
//!
//! | Probe | Path |
//! |---|---|
//! | Liveness | `/healthz` |
//! | Readiness | `/readyz` |
//!
//! The edge handlers keep no state worth warming up, so readiness is
//! unconditional; an unreachable upstream is handled per request.

use crate::{Request, Response};

pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
