//! # Middleware Module
//!
//! The middleware contract and the built-in observability middleware.
//!
//! A [`Middleware`] receives the request, the response under construction,
//! and a [`Next`] continuation. It advances the chain by consuming the
//! continuation exactly once, or short-circuits by writing and ending the
//! response without ever invoking it. The continuation is a by-value handle,
//! so "advance at most once" is enforced by the compiler; "never advances and
//! never responds" hangs nothing here but leaves the response unsent, which
//! is the documented behavior for a middleware that stalls.
//!
//! There is no fault catching in the chain: a panicking middleware or handler
//! propagates to the embedding runtime's fault boundary.

mod core;
mod metrics;
mod tracing;

pub use core::{Handler, Middleware, Next};
pub use metrics::{MetricsMiddleware, MetricsSnapshot};
pub use tracing::TracingMiddleware;
