//! Dispatcher core - hot path for request dispatch.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::middleware::{Handler, Middleware, Next};
use crate::pattern::InvalidPatternError;
use crate::registry::{HandlerTable, MiddlewareTable, Route};
use crate::resolver::{extract_parameters, Resolver};
use crate::runtime_config::RuntimeConfig;
use crate::server::{Request, Response};

/// Request dispatcher: owns the resolver and the handler/middleware tables,
/// and drives the per-request pipeline.
///
/// Registration (`add_route`, `handler`, `middleware`, ...) takes `&mut self`
/// and belongs to the application's startup phase. [`Dispatcher::handle`]
/// takes `&self` and may be called concurrently from many threads once the
/// dispatcher is shared (e.g. behind an `Arc`); the only interior mutability
/// is the resolver's bounded resolution cache.
pub struct Dispatcher {
    resolver: Resolver,
    handlers: HandlerTable,
    middleware: MiddlewareTable,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a dispatcher configured from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&RuntimeConfig::from_env())
    }

    /// Create a dispatcher with an explicit runtime configuration.
    #[must_use]
    pub fn with_config(config: &RuntimeConfig) -> Self {
        Self {
            resolver: Resolver::new(config),
            handlers: HandlerTable::new(),
            middleware: MiddlewareTable::new(),
        }
    }

    /// Compile `pattern` and register a new route for `method`.
    ///
    /// Returns the shared route descriptor, which is the token subsequent
    /// [`Dispatcher::handler`] and [`Dispatcher::middleware`] calls attach to.
    /// Fails with [`InvalidPatternError`] on a malformed pattern; callers are
    /// expected to refuse to start rather than recover.
    ///
    /// Registering an identical `(method, pattern)` again creates a second,
    /// independent descriptor; handler attachment is keyed structurally, so
    /// the most recently attached handler takes effect for matching requests.
    pub fn add_route(
        &mut self,
        method: &str,
        pattern: &str,
    ) -> Result<Arc<Route>, InvalidPatternError> {
        let route = Route::new(method, pattern)?;
        self.resolver.add_route(Arc::clone(&route));
        Ok(route)
    }

    /// Attach the terminal handler for `route`, replacing any handler
    /// previously attached to the same `(method, pattern)`.
    pub fn handler(&mut self, route: &Route, handler: Arc<dyn Handler>) {
        self.handlers.insert(route.key(), handler);
    }

    /// Append route-scoped middleware for `route`.
    pub fn middleware(&mut self, route: &Route, mw: Arc<dyn Middleware>) {
        self.middleware.push_for_route(route.key(), mw);
    }

    /// Append middleware that runs for every matched request.
    pub fn global_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middleware.push_global(mw);
    }

    /// Append middleware scoped to one HTTP method (case-insensitive).
    pub fn method_middleware(&mut self, method: &str, mw: Arc<dyn Middleware>) {
        self.middleware.push_for_method(method, mw);
    }

    /// Clear all routes, handlers, middleware, and the resolution cache.
    pub fn reset(&mut self) {
        self.resolver.reset();
        self.handlers.reset();
        self.middleware.reset();
    }

    #[must_use]
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Dispatch one request: resolve, extract path variables, assemble the
    /// middleware chain, and execute it down to the terminal handler.
    ///
    /// Chain order is fixed: global middleware, then middleware scoped to the
    /// matched route's method, then route-scoped middleware, then the handler.
    /// A middleware that ends the response without invoking its continuation
    /// stops the chain there.
    ///
    /// An unmatched `(method, path)` is answered 404 with an empty body. A
    /// matched route with no attached handler is a registration bug: logged at
    /// `error!` and answered 404. Faults thrown by middleware or handlers are
    /// not caught here; they propagate to the embedding runtime.
    pub fn handle(&self, req: &mut Request, res: &mut Response) {
        let Some(route) = self.resolver.resolve(req.method(), req.path()) else {
            res.set_status(404);
            res.end();
            return;
        };

        let params = match extract_parameters(&route, req.path()) {
            Ok(params) => params,
            Err(e) => {
                error!(
                    method = %route.method(),
                    pattern = %route.spec(),
                    path = %req.path(),
                    error = %e,
                    "parameter extraction failed - CRITICAL"
                );
                res.set_status(500);
                res.end();
                return;
            }
        };
        req.set_path_params(params);

        let Some(handler) = self.handlers.get(route.key()) else {
            error!(
                method = %route.method(),
                pattern = %route.spec(),
                "no handler attached to matched route"
            );
            res.set_status(404);
            res.end();
            return;
        };

        let chain: Vec<Arc<dyn Middleware>> = self
            .middleware
            .global()
            .iter()
            .chain(self.middleware.for_method(route.method()))
            .chain(self.middleware.for_route(route.key()))
            .map(Arc::clone)
            .collect();

        debug!(
            method = %route.method(),
            pattern = %route.spec(),
            chain_len = chain.len(),
            "executing middleware chain"
        );

        Next::new(&chain, handler.as_ref()).run(req, res);

        if !res.is_ended() {
            warn!(
                method = %route.method(),
                pattern = %route.spec(),
                "chain completed without ending the response"
            );
        }
    }
}
