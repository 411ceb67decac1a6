use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use brrtcors::exchange::{HandlerRequest, HandlerResponse};
use brrtcors::middleware::{Middleware, MiddlewareChain};
use brrtcors::{Cors, CorsMiddleware};
use http::Method;
use serde_json::json;

mod common;
use common::preflight;

fn cors_middleware() -> CorsMiddleware {
    CorsMiddleware::new(
        Cors::builder()
            .allowed_origins(["https://example.com"])
            .allowed_methods([Method::GET, Method::POST])
            .allowed_headers(["X-Token"])
            .build(),
    )
}

/// Records how often each hook ran.
#[derive(Default)]
struct CountingMiddleware {
    before: AtomicUsize,
    after: AtomicUsize,
}

impl Middleware for CountingMiddleware {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        self.before.fetch_add(1, Ordering::SeqCst);
        None
    }

    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse, _latency: Duration) {
        self.after.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_cors_before_answers_preflight() {
    let mw = cors_middleware();
    let resp = mw
        .before(&preflight("https://example.com", "POST", Some("X-Token")))
        .expect("preflight should be answered");
    assert_eq!(resp.status, 200);
    assert_eq!(
        resp.get_header("access-control-allow-origin"),
        Some("https://example.com")
    );
    assert_eq!(resp.get_header("access-control-allow-methods"), Some("POST"));
    assert_eq!(resp.get_header("access-control-allow-headers"), Some("X-Token"));
}

#[test]
fn test_cors_before_answers_denied_preflight_with_bare_200() {
    let mw = cors_middleware();
    let resp = mw
        .before(&preflight("https://other.com", "POST", None))
        .expect("denied preflight is still answered");
    assert_eq!(resp.status, 200);
    assert!(resp.headers.is_empty());
}

#[test]
fn test_cors_non_preflight_request() {
    let mw = cors_middleware();
    let req = HandlerRequest::new(Method::GET, "/api/data");
    assert!(mw.before(&req).is_none());
}

#[test]
fn test_cors_after_annotates_actual_response() {
    let mw = cors_middleware();
    let req = HandlerRequest::new(Method::GET, "/").with_header("origin", "https://example.com");
    let mut resp = HandlerResponse::json(200, json!({}));
    mw.after(&req, &mut resp, Duration::from_millis(3));
    assert_eq!(
        resp.get_header("access-control-allow-origin"),
        Some("https://example.com")
    );
    assert_eq!(resp.get_header("access-control-allow-methods"), None);
}

#[test]
fn test_chain_skips_handler_for_preflight() {
    let counter = Arc::new(CountingMiddleware::default());
    let mut chain = MiddlewareChain::new();
    chain.add_middleware(Arc::new(cors_middleware()));
    chain.add_middleware(counter.clone());
    assert_eq!(chain.len(), 2);

    let calls = AtomicUsize::new(0);
    let handler = |_: &HandlerRequest| {
        calls.fetch_add(1, Ordering::SeqCst);
        HandlerResponse::json(418, json!({}))
    };

    let resp = chain.handle(&preflight("https://example.com", "GET", None), &handler);
    assert_eq!(resp.status, 200);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(counter.before.load(Ordering::SeqCst), 1);
    assert_eq!(counter.after.load(Ordering::SeqCst), 1);
    assert_eq!(
        resp.get_header("access-control-allow-origin"),
        Some("https://example.com")
    );
}

#[test]
fn test_chain_runs_handler_for_actual_request() {
    let mut chain = MiddlewareChain::new();
    chain.add_middleware(Arc::new(cors_middleware()));

    let calls = AtomicUsize::new(0);
    let handler = |_: &HandlerRequest| {
        calls.fetch_add(1, Ordering::SeqCst);
        HandlerResponse::json(201, json!({ "ok": true }))
    };

    let req = HandlerRequest::new(Method::POST, "/items").with_header("Origin", "https://example.com");
    let resp = chain.handle(&req, &handler);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(resp.status, 201);
    assert_eq!(
        resp.get_header("access-control-allow-origin"),
        Some("https://example.com")
    );

    let req = HandlerRequest::new(Method::POST, "/items");
    let resp = chain.handle(&req, &handler);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(resp.get_header("access-control-allow-origin"), None);
}

#[test]
fn test_empty_chain_calls_handler() {
    let chain = MiddlewareChain::new();
    assert!(chain.is_empty());
    let resp = chain.handle(&HandlerRequest::new(Method::OPTIONS, "/"), &|_: &HandlerRequest| {
        HandlerResponse::json(204, json!(null))
    });
    assert_eq!(resp.status, 204);
}
