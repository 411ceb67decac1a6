use std::time::Duration;

use tracing::debug;

use super::Middleware;
use crate::cors::Cors;
use crate::exchange::{CorsResponse, HandlerRequest, HandlerResponse};

/// CORS (Cross-Origin Resource Sharing) middleware
///
/// Answers every `OPTIONS` request itself with `200`, carrying grant headers
/// only when the preflight passes. For all other methods the handler runs
/// and the grant headers are added to its response in `after`.
#[derive(Debug, Clone)]
pub struct CorsMiddleware {
    cors: Cors,
}

impl CorsMiddleware {
    #[must_use]
    pub fn new(cors: Cors) -> Self {
        Self { cors }
    }
}

impl Middleware for CorsMiddleware {
    /// Short-circuit preflight requests
    fn before(&self, req: &HandlerRequest) -> Option<HandlerResponse> {
        if !Cors::is_preflight(req) {
            return None;
        }
        let mut res = HandlerResponse::default();
        let decision = self.cors.handle_preflight(req, &mut res);
        res.set_status(200);
        debug!(path = %req.path, %decision, "CORS preflight answered");
        Some(res)
    }

    /// Annotate actual responses
    fn after(&self, req: &HandlerRequest, res: &mut HandlerResponse, _latency: Duration) {
        if Cors::is_preflight(req) {
            return;
        }
        let decision = self.cors.handle_actual(req, res);
        debug!(path = %req.path, %decision, "CORS actual request evaluated");
    }
}
