use std::time::Duration;

use crate::exchange::{HandlerRequest, HandlerResponse};

/// Request/response hook run by [`MiddlewareChain`](super::MiddlewareChain)
///
/// `before` may answer the request itself by returning a response, in which
/// case the handler is skipped. `after` sees every response, including ones
/// produced by `before`.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse, _latency: Duration) {}
}
