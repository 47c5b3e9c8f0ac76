use std::sync::Arc;
use tracing::{debug, info};

use crate::pattern::{compile, InvalidPatternError, RoutePattern};

/// Structural identity of a route: lowercase method plus normalized pattern.
///
/// Two independently registered routes with the same `(method, pattern)` text
/// share a `RouteKey`, which is what makes re-registration overwrite handler
/// and middleware table entries instead of shadowing them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    method: String,
    pattern: String,
}

impl RouteKey {
    /// Build a key from a method token and a pattern string.
    ///
    /// The method is lowercased; a single trailing slash on the pattern is
    /// stripped (except for the root pattern `/`), so `/p` and `/p/` key
    /// identically, matching their identical match semantics.
    #[must_use]
    pub fn new(method: &str, pattern: &str) -> Self {
        let pattern = if pattern.len() > 1 && pattern.ends_with('/') {
            &pattern[..pattern.len() - 1]
        } else {
            pattern
        };
        Self {
            method: method.to_ascii_lowercase(),
            pattern: pattern.to_string(),
        }
    }

    /// Lowercased HTTP method token.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Normalized pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// One registered `(method, compiled pattern)` binding.
///
/// Created at registration time and immutable thereafter; shared as
/// [`Arc<Route>`] between the registry, the resolution cache, and any
/// in-flight requests. Registry identity is the `Arc` pointer; handler and
/// middleware lookup uses the structural [`RouteKey`] instead.
#[derive(Debug)]
pub struct Route {
    method: String,
    spec: String,
    key: RouteKey,
    pattern: RoutePattern,
}

impl Route {
    /// Compile `spec` and create a new shared route descriptor.
    ///
    /// Fails with [`InvalidPatternError`] if the specification does not
    /// conform to the pattern grammar. The method token is normalized to
    /// lower case; method matching is case-insensitive throughout.
    pub fn new(method: &str, spec: &str) -> Result<Arc<Self>, InvalidPatternError> {
        let pattern = compile(spec)?;
        let method = method.to_ascii_lowercase();
        let key = RouteKey::new(&method, spec);
        Ok(Arc::new(Self {
            method,
            spec: spec.to_string(),
            key,
            pattern,
        }))
    }

    /// Lowercased HTTP method this route answers.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The original specification string as registered.
    #[must_use]
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Structural key for handler and middleware table lookup.
    #[must_use]
    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    /// The compiled match predicate and variable names.
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }
}

/// Ordered collection of registered routes.
///
/// Registration order is scan order: the resolver returns the first route
/// whose method and predicate match. Deduplication is by `Arc` identity only;
/// registering an identical `(method, pattern)` string a second time appends
/// a second, independent descriptor.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: Vec<Arc<Route>>,
}

impl RouteRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route unless this exact descriptor is already present.
    pub fn add(&mut self, route: Arc<Route>) {
        if self.routes.iter().any(|r| Arc::ptr_eq(r, &route)) {
            debug!(
                method = %route.method(),
                pattern = %route.spec(),
                "route descriptor already registered, skipping"
            );
            return;
        }
        info!(
            method = %route.method(),
            pattern = %route.spec(),
            total_routes = self.routes.len() + 1,
            "route registered"
        );
        self.routes.push(route);
    }

    /// All routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Drop every registered route.
    pub fn reset(&mut self) {
        self.routes.clear();
    }
}
