use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use super::{Middleware, Next};
use crate::server::{Request, Response};

/// Middleware that counts matched requests and accumulates latency.
///
/// All counters use atomic operations, so one instance can be shared across
/// every request thread without locks. Note that unmatched requests never
/// enter the middleware chain; 404s produced by the dispatcher itself are not
/// observed here.
#[derive(Default)]
pub struct MetricsMiddleware {
    request_count: AtomicUsize,
    client_errors: AtomicUsize,
    server_errors: AtomicUsize,
    total_latency_ns: AtomicU64,
}

/// Point-in-time view of the collected counters, e.g. for a status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests: usize,
    pub client_errors: usize,
    pub server_errors: usize,
    pub average_latency_us: u64,
}

impl MetricsMiddleware {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total matched requests that entered the chain through this middleware.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Responses that finished with a 4xx status.
    #[must_use]
    pub fn client_error_count(&self) -> usize {
        self.client_errors.load(Ordering::Relaxed)
    }

    /// Responses that finished with a 5xx status.
    #[must_use]
    pub fn server_error_count(&self) -> usize {
        self.server_errors.load(Ordering::Relaxed)
    }

    /// Mean chain latency across all observed requests.
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = self.request_count.load(Ordering::Relaxed);
        if count == 0 {
            return Duration::ZERO;
        }
        let total = self.total_latency_ns.load(Ordering::Relaxed);
        Duration::from_nanos(total / count as u64)
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.request_count(),
            client_errors: self.client_error_count(),
            server_errors: self.server_error_count(),
            average_latency_us: self.average_latency().as_micros() as u64,
        }
    }
}

impl Middleware for MetricsMiddleware {
    fn handle(&self, req: &mut Request, res: &mut Response, next: Next<'_>) {
        let start = Instant::now();
        self.request_count.fetch_add(1, Ordering::Relaxed);

        next.run(req, res);

        self.total_latency_ns
            .fetch_add(start.elapsed().as_nanos() as u64, Ordering::Relaxed);
        match res.status() {
            400..=499 => {
                self.client_errors.fetch_add(1, Ordering::Relaxed);
            }
            500..=599 => {
                self.server_errors.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }
}
