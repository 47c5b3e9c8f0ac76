//! Resolver core - hot path for route resolution and parameter extraction.

use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::cache::ResolutionCache;
use crate::registry::{Route, RouteRegistry};
use crate::runtime_config::RuntimeConfig;

/// Maximum number of path parameters before heap allocation.
/// Most REST-style routes carry well under eight variables.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Parameter names are `Arc<str>` because they come from the static route
/// table and clone in O(1); values are per-request substrings of the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of resolving one concrete request against the route table.
///
/// Owned by the request that produced it; never shared across requests.
#[derive(Debug, Clone)]
pub struct MatchedRoute {
    /// The route that matched.
    pub route: Arc<Route>,
    /// The concrete request path that produced the match.
    pub path: String,
    /// Captured path variables, in the pattern's occurrence order.
    pub params: ParamVec,
}

impl MatchedRoute {
    /// Get a captured variable by name. Last occurrence wins if a pattern
    /// repeats a name at different depths.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert the captured variables to a map. Allocates; prefer
    /// [`MatchedRoute::get`] on the hot path.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Capture-group bookkeeping disagreed with the compiled pattern.
///
/// Structurally impossible given the compiler's invariant; if it occurs it
/// indicates a compiler bug and must be surfaced loudly, never swallowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalConsistencyError {
    /// The path no longer matches the pattern it was resolved against.
    PatternMismatch { pattern: String, path: String },
    /// Capture-group count disagrees with the variable-name list.
    ParamCountMismatch {
        pattern: String,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for InternalConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalConsistencyError::PatternMismatch { pattern, path } => {
                write!(
                    f,
                    "internal consistency error: path '{path}' does not match pattern '{pattern}' \
                    it was resolved against"
                )
            }
            InternalConsistencyError::ParamCountMismatch {
                pattern,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "internal consistency error: pattern '{pattern}' declares {expected} variable(s) \
                    but produced {actual} capture(s)"
                )
            }
        }
    }
}

impl std::error::Error for InternalConsistencyError {}

/// Re-run a route's predicate against `path` and zip captures with the
/// variable-name list positionally.
///
/// Idempotent and side-effect-free. Called after a successful resolution, so
/// both error variants indicate an internal fault rather than a client error.
pub fn extract_parameters(
    route: &Route,
    path: &str,
) -> Result<ParamVec, InternalConsistencyError> {
    let pattern = route.pattern();
    let names = pattern.params();
    let caps = pattern.regex().captures(path).ok_or_else(|| {
        InternalConsistencyError::PatternMismatch {
            pattern: pattern.raw().to_string(),
            path: path.to_string(),
        }
    })?;

    if caps.len() - 1 != names.len() {
        return Err(InternalConsistencyError::ParamCountMismatch {
            pattern: pattern.raw().to_string(),
            expected: names.len(),
            actual: caps.len() - 1,
        });
    }

    let mut params = ParamVec::new();
    for (idx, name) in names.iter().enumerate() {
        match caps.get(idx + 1) {
            Some(m) => params.push((Arc::clone(name), m.as_str().to_string())),
            None => {
                return Err(InternalConsistencyError::ParamCountMismatch {
                    pattern: pattern.raw().to_string(),
                    expected: names.len(),
                    actual: idx,
                });
            }
        }
    }
    Ok(params)
}

/// Route resolution engine: linear first-match scan behind a bounded cache.
///
/// Owns the route registry and a `(method + path)` keyed LRU cache. Resolution
/// is `&self` and thread-safe; registration is `&mut self` and expected to
/// happen during single-threaded startup.
///
/// Adding a route does **not** invalidate the cache: a `(method, path)` that
/// already resolved keeps resolving to the same route until [`Resolver::reset`]
/// or eviction. This staleness window is an accepted trade-off; registration
/// never happens during steady-state serving.
pub struct Resolver {
    registry: RouteRegistry,
    cache: ResolutionCache,
}

impl Resolver {
    /// Create a resolver with the cache bound from `config`.
    #[must_use]
    pub fn new(config: &RuntimeConfig) -> Self {
        Self::with_cache_capacity(config.route_cache_capacity)
    }

    /// Create a resolver with an explicit cache capacity.
    #[must_use]
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            registry: RouteRegistry::new(),
            cache: ResolutionCache::new(capacity),
        }
    }

    /// Append a route to the registry. The resolution cache is left as-is.
    pub fn add_route(&mut self, route: Arc<Route>) {
        self.registry.add(route);
    }

    #[must_use]
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Number of entries currently memoized.
    #[must_use]
    pub fn cached_resolutions(&self) -> usize {
        self.cache.len()
    }

    /// Resolve `(method, path)` to a route.
    ///
    /// The method is matched case-insensitively, the path verbatim. On a cache
    /// miss the registry is scanned in registration order and the first route
    /// whose method and predicate both match wins; the result is memoized.
    /// Misses are not cached.
    #[must_use]
    pub fn resolve(&self, method: &str, path: &str) -> Option<Arc<Route>> {
        let method = method.to_ascii_lowercase();
        let mut cache_key = String::with_capacity(method.len() + path.len());
        cache_key.push_str(&method);
        cache_key.push_str(path);

        if let Some(route) = self.cache.get(&cache_key) {
            debug!(method = %method, path = %path, "route resolved from cache");
            return Some(route);
        }

        debug!(
            method = %method,
            path = %path,
            routes = self.registry.len(),
            "route resolution scan"
        );
        let scan_start = Instant::now();

        let result = self
            .registry
            .routes()
            .iter()
            .find(|route| route.method() == method && route.pattern().is_match(path))
            .map(Arc::clone);

        let scan_duration = scan_start.elapsed();

        match result {
            Some(route) => {
                if scan_duration > std::time::Duration::from_millis(1) {
                    warn!(
                        method = %method,
                        path = %path,
                        pattern = %route.spec(),
                        duration_us = scan_duration.as_micros() as u64,
                        "slow route resolution"
                    );
                } else {
                    info!(
                        method = %method,
                        path = %path,
                        pattern = %route.spec(),
                        duration_us = scan_duration.as_micros() as u64,
                        "route resolved"
                    );
                }
                self.cache.insert(cache_key, Arc::clone(&route));
                Some(route)
            }
            None => {
                warn!(
                    method = %method,
                    path = %path,
                    duration_us = scan_duration.as_micros() as u64,
                    "no route matched"
                );
                None
            }
        }
    }

    /// Resolve and extract parameters in one step.
    pub fn resolve_matched(
        &self,
        method: &str,
        path: &str,
    ) -> Result<Option<MatchedRoute>, InternalConsistencyError> {
        match self.resolve(method, path) {
            Some(route) => {
                let params = extract_parameters(&route, path)?;
                Ok(Some(MatchedRoute {
                    route,
                    path: path.to_string(),
                    params,
                }))
            }
            None => Ok(None),
        }
    }

    /// Clear the registry and the resolution cache.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.cache.clear();
    }
}
