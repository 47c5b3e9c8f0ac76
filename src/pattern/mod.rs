//! # Pattern Module
//!
//! The pattern module compiles route specification strings into matchers.
//! A specification is a `/`-separated sequence of segments:
//!
//! - **literal** segments match themselves exactly (`/pets`)
//! - **variable** segments (`:name`) capture one path segment into a named
//!   parameter (`/pets/:id`)
//! - a trailing **wildcard** segment (`*`) matches any remainder of the path,
//!   including further slashes (`/static/*`)
//!
//! ## Compilation
//!
//! [`compile`] validates the specification against the grammar and produces a
//! [`RoutePattern`]: an anchored regex predicate plus the ordered list of
//! variable names. Compilation happens once at registration time; request-time
//! matching only evaluates the precompiled predicate.
//!
//! Malformed specifications fail with [`InvalidPatternError`] naming the
//! offending pattern, so an application refuses to start rather than serving
//! routes that can never match.
//!
//! ## Matching policy
//!
//! Paths match case-sensitively. A single trailing slash on either the
//! specification or the request path is accepted and carries no meaning.

mod core;
#[cfg(test)]
mod tests;

pub use core::{
    compile, InvalidPatternError, RoutePattern, VARIABLE_MARKER, WILDCARD_MARKER,
};
