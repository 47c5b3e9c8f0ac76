//! # Registry Module
//!
//! Registration-time state: the ordered route list plus the handler and
//! middleware tables.
//!
//! A [`Route`] is created once per registration and shared as `Arc<Route>`.
//! The [`RouteRegistry`] keeps routes in registration order, which is also the
//! resolver's scan order. Handler and middleware attachment goes through the
//! structural [`RouteKey`] so that registering the same `(method, pattern)`
//! twice and attaching a handler to each leaves the most recently attached
//! handler in effect.
//!
//! All mutation here happens during an application's startup phase; at
//! request time these structures are only read.

mod core;
mod tables;

pub use core::{Route, RouteKey, RouteRegistry};
pub use tables::{HandlerTable, MiddlewareTable};
