use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::RouteKey;
use crate::middleware::{Handler, Middleware};

/// Terminal handlers keyed by structural route identity.
///
/// Keying on [`RouteKey`] rather than descriptor identity is what gives
/// duplicate registrations last-writer-wins semantics: attaching a handler to
/// a re-registered `(method, pattern)` overwrites the earlier entry, and the
/// resolver's first-match scan still reaches the surviving handler.
#[derive(Default)]
pub struct HandlerTable {
    handlers: HashMap<RouteKey, Arc<dyn Handler>>,
}

impl HandlerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` as the terminal handler for `key`, replacing any
    /// previously attached handler.
    pub fn insert(&mut self, key: &RouteKey, handler: Arc<dyn Handler>) {
        if self
            .handlers
            .insert(key.clone(), handler)
            .is_some()
        {
            warn!(
                method = %key.method(),
                pattern = %key.pattern(),
                "replaced existing handler for route"
            );
        } else {
            info!(
                method = %key.method(),
                pattern = %key.pattern(),
                total_handlers = self.handlers.len(),
                "handler registered"
            );
        }
    }

    #[must_use]
    pub fn get(&self, key: &RouteKey) -> Option<&Arc<dyn Handler>> {
        self.handlers.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn reset(&mut self) {
        self.handlers.clear();
    }
}

/// The three middleware scopes: global, per-method, per-route.
///
/// Each list is append-only and preserves registration order. Getters return
/// empty slices, never `None`, so chain assembly is a plain concatenation.
#[derive(Default)]
pub struct MiddlewareTable {
    global: Vec<Arc<dyn Middleware>>,
    by_method: HashMap<String, Vec<Arc<dyn Middleware>>>,
    by_route: HashMap<RouteKey, Vec<Arc<dyn Middleware>>>,
}

impl MiddlewareTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append middleware that runs for every matched request.
    pub fn push_global(&mut self, mw: Arc<dyn Middleware>) {
        self.global.push(mw);
    }

    /// Append middleware scoped to one HTTP method (case-insensitive).
    pub fn push_for_method(&mut self, method: &str, mw: Arc<dyn Middleware>) {
        self.by_method
            .entry(method.to_ascii_lowercase())
            .or_default()
            .push(mw);
    }

    /// Append middleware scoped to one route's structural identity.
    pub fn push_for_route(&mut self, key: &RouteKey, mw: Arc<dyn Middleware>) {
        self.by_route.entry(key.clone()).or_default().push(mw);
    }

    #[must_use]
    pub fn global(&self) -> &[Arc<dyn Middleware>] {
        &self.global
    }

    #[must_use]
    pub fn for_method(&self, method: &str) -> &[Arc<dyn Middleware>] {
        self.by_method
            .get(&method.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn for_route(&self, key: &RouteKey) -> &[Arc<dyn Middleware>] {
        self.by_route
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Clear all three scopes.
    pub fn reset(&mut self) {
        self.global.clear();
        self.by_method.clear();
        self.by_route.clear();
    }
}
