use std::sync::Arc;

use crate::server::{Request, Response};

/// Terminal handler for a matched route.
///
/// Runs last in the chain and never receives a continuation. Implemented
/// automatically for matching closures.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &mut Request, res: &mut Response);
}

impl<F> Handler for F
where
    F: Fn(&mut Request, &mut Response) + Send + Sync,
{
    fn handle(&self, req: &mut Request, res: &mut Response) {
        self(req, res)
    }
}

/// A chainable pre-handler step.
///
/// A middleware either advances the chain by consuming its [`Next`] exactly
/// once, or terminates the response itself and drops the continuation, in
/// which case no later middleware and no handler run. The continuation is
/// consumed by value, so advancing twice does not compile.
pub trait Middleware: Send + Sync {
    fn handle(&self, req: &mut Request, res: &mut Response, next: Next<'_>);
}

impl<F> Middleware for F
where
    F: for<'a> Fn(&mut Request, &mut Response, Next<'a>) + Send + Sync,
{
    fn handle(&self, req: &mut Request, res: &mut Response, next: Next<'_>) {
        self(req, res, next)
    }
}

/// Continuation handle for the remainder of a middleware chain.
///
/// Holds the not-yet-executed tail of the chain plus the terminal handler.
/// [`Next::run`] executes the next link, or the handler once the chain is
/// exhausted.
pub struct Next<'a> {
    chain: &'a [Arc<dyn Middleware>],
    handler: &'a dyn Handler,
}

impl<'a> Next<'a> {
    pub(crate) fn new(chain: &'a [Arc<dyn Middleware>], handler: &'a dyn Handler) -> Self {
        Self { chain, handler }
    }

    /// Advance to the next link in the chain.
    pub fn run(self, req: &mut Request, res: &mut Response) {
        match self.chain.split_first() {
            Some((mw, rest)) => mw.handle(
                req,
                res,
                Next {
                    chain: rest,
                    handler: self.handler,
                },
            ),
            None => self.handler.handle(req, res),
        }
    }
}
