use std::time::Instant;
use tracing::info;

use super::{Middleware, Next};
use crate::server::{Request, Response};

/// Middleware that emits one structured completion event per matched request.
///
/// Typically registered globally, first, so the recorded latency covers the
/// whole chain below it.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn handle(&self, req: &mut Request, res: &mut Response, next: Next<'_>) {
        let start = Instant::now();

        next.run(req, res);

        info!(
            method = %req.method(),
            path = %req.path(),
            status = res.status(),
            latency_us = start.elapsed().as_micros() as u64,
            "request completed"
        );
    }
}
