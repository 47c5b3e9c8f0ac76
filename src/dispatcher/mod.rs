//! # Dispatcher Module
//!
//! The request dispatch pipeline: a single pass with no retries.
//!
//! 1. **Parse** — done by [`crate::server::Request`] construction; the query
//!    string is split off before matching but stays available to the chain.
//! 2. **Resolve** — [`crate::resolver::Resolver::resolve`]; an unmatched
//!    request terminates with a 404 and an empty body.
//! 3. **Assemble** — global, then method-scoped, then route-scoped middleware
//!    in that fixed order, with the terminal handler as the final link. The
//!    order is never deduplicated, reordered, or reversed.
//! 4. **Execute** — each link receives a by-value continuation; the chain
//!    advances only when a link invokes it, and stops where a link ends the
//!    response instead.
//!
//! There is no timeout and no internal fault catching: a middleware that
//! neither responds nor continues stalls its request, and panics propagate to
//! the embedding runtime's fault boundary. Both are deliberate contract
//! boundaries, not gaps.

mod core;

pub use core::Dispatcher;
