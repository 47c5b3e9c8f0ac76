//! Tracing subscriber setup for embedders that want the crate's structured
//! events on stdout.
//!
//! The routing core only *emits* `tracing` events; installing a subscriber is
//! the embedding application's choice. [`init`] wires up a sensible default:
//! a fmt subscriber filtered by `RUST_LOG` (falling back to `info`). Calling
//! it when a subscriber is already installed is a no-op, so libraries and
//! tests can both call it safely.

use tracing_subscriber::EnvFilter;

/// Install the default fmt subscriber. Idempotent.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}
