use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::{Handler, Middleware};
use crate::exchange::{HandlerRequest, HandlerResponse};

/// Ordered list of middleware applied around a handler
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware; hooks run in insertion order.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Run `before` hooks, the handler (unless a hook answered), then `after` hooks.
    ///
    /// Every `before` hook runs even after one has produced a response; the
    /// first response wins.
    pub fn handle<H>(&self, req: &HandlerRequest, handler: &H) -> HandlerResponse
    where
        H: Handler<HandlerRequest, Response = HandlerResponse> + ?Sized,
    {
        let mut early_resp: Option<HandlerResponse> = None;
        for (idx, mw) in self.middlewares.iter().enumerate() {
            if early_resp.is_none() {
                early_resp = mw.before(req);
                if early_resp.is_some() {
                    debug!(
                        middleware_idx = idx,
                        method = %req.method,
                        path = %req.path,
                        "Middleware returned early response"
                    );
                }
            } else {
                mw.before(req);
            }
        }

        let (mut resp, latency) = match early_resp {
            Some(r) => (r, Duration::from_millis(0)),
            None => {
                let start = Instant::now();
                let r = handler.call(req);
                (r, start.elapsed())
            }
        };

        for mw in &self.middlewares {
            mw.after(req, &mut resp, latency);
        }
        resp
    }
}

impl std::fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("middleware_count", &self.middlewares.len())
            .finish()
    }
}
