//! # Resolver Module
//!
//! The resolver answers "which route handles `(method, path)`" for every
//! inbound request.
//!
//! ## Two-tier lookup
//!
//! 1. **Cache hit**: a bounded LRU cache keyed by `lowercase(method) + path`
//!    returns the previously matched route in O(1), with no predicate
//!    evaluation.
//! 2. **Cache miss**: the registry is scanned linearly in registration order;
//!    the first route whose method matches (case-insensitively) and whose
//!    compiled predicate accepts the path wins, and the result is memoized.
//!
//! Only successful matches are cached; 404s always re-scan. Parameter
//! extraction is a separate, idempotent step ([`extract_parameters`]) so that
//! the cache can hold `Route`s rather than per-request capture data.

mod cache;
mod core;
#[cfg(test)]
mod tests;

pub use cache::ResolutionCache;
pub use core::{
    extract_parameters, InternalConsistencyError, MatchedRoute, ParamVec, Resolver,
    MAX_INLINE_PARAMS,
};
