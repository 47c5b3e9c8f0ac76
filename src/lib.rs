//! # Wayfinder
//!
//! **Wayfinder** is the routing and request-dispatch core of an embeddable
//! HTTP micro-framework: given a registered set of `(method, pattern)` routes,
//! each with zero or more middleware and exactly one terminal handler, it
//! decides which route answers an inbound request, extracts the named path
//! variables, and executes the ordered middleware chain down to the handler.
//!
//! It deliberately owns no sockets. The accept loop, HTTP framing, body
//! streaming, and process-level fault isolation belong to the embedding
//! runtime, which talks to this core only through the
//! [`server::Request`] / [`server::Response`] boundary types.
//!
//! ## Architecture
//!
//! - **[`pattern`]** — compiles `/seg/:var/*` specification strings into
//!   anchored predicates plus ordered variable names
//! - **[`registry`]** — the ordered route list and the handler/middleware
//!   tables, keyed by structural route identity
//! - **[`resolver`]** — `(method, path)` resolution: bounded LRU cache in
//!   front of a first-match linear scan
//! - **[`dispatcher`]** — per-request pipeline: resolve, extract, assemble
//!   the `global ++ method ++ route` chain, execute with explicit
//!   continuations
//! - **[`middleware`]** — the [`Middleware`]/[`Handler`] contract and the
//!   built-in observability middleware
//! - **[`server`]** — the request/response types exchanged with the host
//! - **[`runtime_config`]**, **[`telemetry`]** — environment-driven tuning
//!   and optional `tracing` subscriber setup
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use wayfinder::{Dispatcher, Request, Response};
//!
//! let mut app = Dispatcher::new();
//! let route = app.add_route("GET", "/pets/:id").unwrap();
//! app.handler(
//!     &route,
//!     Arc::new(|req: &mut Request, res: &mut Response| {
//!         let id = req.path_param("id").unwrap_or_default().to_string();
//!         res.send_json(200, &serde_json::json!({ "id": id }));
//!     }),
//! );
//!
//! let mut req = Request::new("GET", "/pets/42");
//! let mut res = Response::new();
//! app.handle(&mut req, &mut res);
//!
//! assert_eq!(res.status(), 200);
//! ```
//!
//! ## Matching policy
//!
//! Paths match case-sensitively and whole-string (never by prefix); HTTP
//! methods match case-insensitively. A single trailing slash on a request
//! path is equivalent to its absence. Registering the same `(method,
//! pattern)` twice and attaching a handler to each leaves the most recently
//! attached handler in effect.
//!
//! ## Concurrency
//!
//! Registration is `&mut` and expected during single-threaded startup;
//! [`Dispatcher::handle`] is `&self` and safe to drive from many threads at
//! once. The only interior mutability is the resolver's bounded resolution
//! cache, whose lock is scoped to individual lookups and inserts.

pub mod dispatcher;
pub mod middleware;
pub mod pattern;
pub mod registry;
pub mod resolver;
pub mod runtime_config;
pub mod server;
pub mod telemetry;

pub use dispatcher::Dispatcher;
pub use middleware::{Handler, Middleware, MetricsMiddleware, Next, TracingMiddleware};
pub use pattern::{compile, InvalidPatternError, RoutePattern};
pub use registry::{Route, RouteKey, RouteRegistry};
pub use resolver::{
    extract_parameters, InternalConsistencyError, MatchedRoute, ParamVec, Resolver,
};
pub use runtime_config::RuntimeConfig;
pub use server::{Request, Response};
