use std::sync::{Arc, Mutex};
use wayfinder::middleware::{Handler, MetricsMiddleware, Middleware, Next};
use wayfinder::server::{Request, Response};
use wayfinder::Dispatcher;

use tracing_util::TestTracing;

type CallLog = Arc<Mutex<Vec<&'static str>>>;

/// Middleware that records its label and continues the chain.
struct Tag {
    label: &'static str,
    log: CallLog,
}

impl Middleware for Tag {
    fn handle(&self, req: &mut Request, res: &mut Response, next: Next<'_>) {
        self.log.lock().unwrap().push(self.label);
        next.run(req, res);
    }
}

/// Middleware that answers the request itself and drops the continuation.
struct Halt {
    label: &'static str,
    log: CallLog,
}

impl Middleware for Halt {
    fn handle(&self, _req: &mut Request, res: &mut Response, _next: Next<'_>) {
        self.log.lock().unwrap().push(self.label);
        res.send_text(403, "halted");
    }
}

/// Terminal handler that records its label and answers 200.
struct Record {
    label: &'static str,
    log: CallLog,
}

impl Handler for Record {
    fn handle(&self, _req: &mut Request, res: &mut Response) {
        self.log.lock().unwrap().push(self.label);
        res.send_text(200, "ok");
    }
}

fn dispatch(app: &Dispatcher, method: &str, target: &str) -> Response {
    let mut req = Request::new(method, target);
    let mut res = Response::new();
    app.handle(&mut req, &mut res);
    res
}

#[test]
fn test_middleware_ordering_global_method_route_handler() {
    let _tracing = TestTracing::init();
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let tag = |label| {
        Arc::new(Tag {
            label,
            log: Arc::clone(&log),
        })
    };

    let mut app = Dispatcher::new();
    let route = app.add_route("GET", "/p").unwrap();
    // Registered out of scope order on purpose; execution order must follow
    // scope precedence, not registration time.
    app.middleware(&route, tag("R1"));
    app.global_middleware(tag("G1"));
    app.method_middleware("GET", tag("M1"));
    app.global_middleware(tag("G2"));
    app.method_middleware("GET", tag("M2"));
    app.middleware(&route, tag("R2"));
    app.handler(
        &route,
        Arc::new(Record {
            label: "H",
            log: Arc::clone(&log),
        }),
    );

    let res = dispatch(&app, "GET", "/p");
    assert_eq!(res.status(), 200);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["G1", "G2", "M1", "M2", "R1", "R2", "H"]
    );
}

#[test]
fn test_short_circuit_skips_rest_of_chain() {
    let _tracing = TestTracing::init();
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));

    let mut app = Dispatcher::new();
    let route = app.add_route("GET", "/p").unwrap();
    app.middleware(
        &route,
        Arc::new(Halt {
            label: "R1",
            log: Arc::clone(&log),
        }),
    );
    app.middleware(
        &route,
        Arc::new(Tag {
            label: "R2",
            log: Arc::clone(&log),
        }),
    );
    app.handler(
        &route,
        Arc::new(Record {
            label: "H",
            log: Arc::clone(&log),
        }),
    );

    let res = dispatch(&app, "GET", "/p");
    assert_eq!(res.status(), 403);
    assert_eq!(*log.lock().unwrap(), vec!["R1"]);
}

#[test]
fn test_unmatched_request_is_404_with_empty_body() {
    let _tracing = TestTracing::init();
    let app = Dispatcher::new();
    let res = dispatch(&app, "GET", "/nowhere");
    assert_eq!(res.status(), 404);
    assert!(res.body().is_empty());
    assert!(res.is_ended());
}

#[test]
fn test_duplicate_route_uses_latest_handler() {
    let _tracing = TestTracing::init();
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));

    let mut app = Dispatcher::new();
    let first = app.add_route("GET", "/p").unwrap();
    app.handler(
        &first,
        Arc::new(Record {
            label: "H1",
            log: Arc::clone(&log),
        }),
    );
    let second = app.add_route("GET", "/p").unwrap();
    app.handler(
        &second,
        Arc::new(Record {
            label: "H2",
            log: Arc::clone(&log),
        }),
    );

    let res = dispatch(&app, "GET", "/p");
    assert_eq!(res.status(), 200);
    assert_eq!(*log.lock().unwrap(), vec!["H2"]);
}

#[test]
fn test_path_params_reach_the_handler() {
    let _tracing = TestTracing::init();
    let mut app = Dispatcher::new();
    let route = app.add_route("GET", "/users/:userId/posts/:postId").unwrap();
    app.handler(
        &route,
        Arc::new(|req: &mut Request, res: &mut Response| {
            let user = req.path_param("userId").unwrap_or_default();
            let post = req.path_param("postId").unwrap_or_default();
            res.send_json(200, &serde_json::json!({ "user": user, "post": post }));
        }),
    );

    let res = dispatch(&app, "GET", "/users/u1/posts/p9");
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["user"], "u1");
    assert_eq!(body["post"], "p9");
}

#[test]
fn test_query_string_excluded_from_matching_but_visible() {
    let _tracing = TestTracing::init();
    let mut app = Dispatcher::new();
    let route = app.add_route("GET", "/pets/:id").unwrap();
    app.handler(
        &route,
        Arc::new(|req: &mut Request, res: &mut Response| {
            assert_eq!(req.path(), "/pets/1");
            assert_eq!(req.query_param("full"), Some("true"));
            res.send_text(200, "ok");
        }),
    );

    let res = dispatch(&app, "GET", "/pets/1?full=true");
    assert_eq!(res.status(), 200);
}

#[test]
fn test_method_middleware_keyed_by_matched_method() {
    let _tracing = TestTracing::init();
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));

    let mut app = Dispatcher::new();
    let route = app.add_route("GET", "/p").unwrap();
    app.method_middleware(
        "POST",
        Arc::new(Tag {
            label: "post-mw",
            log: Arc::clone(&log),
        }),
    );
    app.method_middleware(
        "GET",
        Arc::new(Tag {
            label: "get-mw",
            log: Arc::clone(&log),
        }),
    );
    app.handler(
        &route,
        Arc::new(Record {
            label: "H",
            log: Arc::clone(&log),
        }),
    );

    let res = dispatch(&app, "GET", "/p");
    assert_eq!(res.status(), 200);
    assert_eq!(*log.lock().unwrap(), vec!["get-mw", "H"]);
}

#[test]
fn test_matched_route_without_handler_is_404() {
    let _tracing = TestTracing::init();
    let mut app = Dispatcher::new();
    let _route = app.add_route("GET", "/p").unwrap();

    let res = dispatch(&app, "GET", "/p");
    assert_eq!(res.status(), 404);
    assert!(res.body().is_empty());
}

#[test]
fn test_trailing_slash_on_request_path() {
    let _tracing = TestTracing::init();
    let mut app = Dispatcher::new();
    let route = app.add_route("GET", "/a/:x/b").unwrap();
    app.handler(
        &route,
        Arc::new(|req: &mut Request, res: &mut Response| {
            let x = req.path_param("x").unwrap_or_default().to_string();
            res.send_json(200, &serde_json::json!({ "x": x }));
        }),
    );

    for target in ["/a/123/b", "/a/123/b/"] {
        let res = dispatch(&app, "GET", target);
        assert_eq!(res.status(), 200, "target '{target}'");
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["x"], "123");
    }

    assert_eq!(dispatch(&app, "GET", "/a/123/b/extra").status(), 404);
}

#[test]
fn test_metrics_middleware_observes_chain() {
    let _tracing = TestTracing::init();
    let metrics = Arc::new(MetricsMiddleware::new());

    let mut app = Dispatcher::new();
    app.global_middleware(Arc::clone(&metrics) as Arc<dyn Middleware>);
    let route = app.add_route("GET", "/p").unwrap();
    app.handler(
        &route,
        Arc::new(|_req: &mut Request, res: &mut Response| {
            res.send_text(200, "ok");
        }),
    );

    assert_eq!(dispatch(&app, "GET", "/p").status(), 200);
    assert_eq!(dispatch(&app, "GET", "/p").status(), 200);

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.requests, 2);
    assert_eq!(snapshot.client_errors, 0);
    assert_eq!(snapshot.server_errors, 0);
}

#[test]
fn test_reset_clears_routes_handlers_and_cache() {
    let _tracing = TestTracing::init();
    let mut app = Dispatcher::new();
    let route = app.add_route("GET", "/p").unwrap();
    app.handler(
        &route,
        Arc::new(|_req: &mut Request, res: &mut Response| {
            res.send_text(200, "ok");
        }),
    );

    assert_eq!(dispatch(&app, "GET", "/p").status(), 200);
    app.reset();
    assert_eq!(dispatch(&app, "GET", "/p").status(), 404);
    assert_eq!(app.resolver().cached_resolutions(), 0);
}

#[test]
fn test_invalid_pattern_fails_registration() {
    let _tracing = TestTracing::init();
    let mut app = Dispatcher::new();
    let err = app.add_route("GET", "/a//b").unwrap_err();
    assert!(err.to_string().contains("/a//b"));
}
