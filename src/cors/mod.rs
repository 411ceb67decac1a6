//! # CORS Request Classifier & Header Writer
//!
//! [`Cors`] classifies each request as a preflight (`OPTIONS`) or an actual
//! request, evaluates it against the [`PolicyStore`], and writes the
//! matching `Access-Control-*` headers. A denied request gets no CORS
//! headers at all; enforcement is left to the browser.
//!
//! ## Preflight
//!
//! 1. `Origin` must be present and allowed
//! 2. `Access-Control-Request-Method` must be allowed
//! 3. Every `Access-Control-Request-Headers` entry must be allowed
//!
//! On success the response echoes the origin, the single requested method
//! and the requested headers, plus credentials / max-age when configured.
//! The caller always answers a preflight with `200`, granted or not.
//!
//! ## Actual Request
//!
//! A request without `Origin` is not a CORS request and is left alone. An
//! allowed origin is echoed together with the exposed headers and the
//! credentials flag. The inner handler runs either way.
//!
//! ## Example
//!
//! ```rust
//! use brrtcors::cors::Cors;
//! use brrtcors::exchange::{HandlerRequest, HandlerResponse};
//! use http::Method;
//!
//! let cors = Cors::builder()
//!     .allowed_origins(["https://app.example.com"])
//!     .allowed_methods([Method::GET, Method::POST])
//!     .allowed_headers(["Content-Type"])
//!     .build();
//!
//! let req = HandlerRequest::new(Method::OPTIONS, "/items")
//!     .with_header("Origin", "https://app.example.com")
//!     .with_header("Access-Control-Request-Method", "POST")
//!     .with_header("Access-Control-Request-Headers", "Content-Type");
//! let mut res = HandlerResponse::default();
//! assert!(cors.handle_preflight(&req, &mut res).is_granted());
//! assert_eq!(res.get_header("access-control-allow-methods"), Some("POST"));
//! ```

mod builder;
mod decision;

pub use builder::CorsBuilder;
pub use decision::{Decision, DenialReason};

use std::sync::Arc;

use http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, ACCESS_CONTROL_MAX_AGE,
    ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
};
use tracing::trace;

use crate::config::{default_options, CorsOptions};
use crate::exchange::{CorsRequest, CorsResponse};
use crate::logger::{CorsLogger, OffLogger, TracingLogger};
use crate::policy::PolicyStore;

/// Shared handle to a CORS policy and its diagnostics logger
///
/// Cloning is cheap; clones share the same policy, so a
/// [`refresh_origins`](Self::refresh_origins) through any clone is seen by
/// all of them.
#[derive(Clone)]
pub struct Cors {
    store: Arc<PolicyStore>,
    logger: Arc<dyn CorsLogger>,
}

impl std::fmt::Debug for Cors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cors").field("store", &self.store).finish_non_exhaustive()
    }
}

impl Cors {
    /// Build from options.
    ///
    /// Denials are logged through `tracing` when `options.debug` is set and
    /// dropped otherwise.
    #[must_use]
    pub fn new(options: &CorsOptions) -> Self {
        let logger: Arc<dyn CorsLogger> = if options.debug {
            Arc::new(TracingLogger)
        } else {
            Arc::new(OffLogger)
        };
        Self::with_logger(options, logger)
    }

    /// Build from options with an explicit diagnostics logger.
    #[must_use]
    pub fn with_logger(options: &CorsOptions, logger: Arc<dyn CorsLogger>) -> Self {
        Self {
            store: Arc::new(PolicyStore::build(options)),
            logger,
        }
    }

    /// Policy built from [`default_options`]: every origin, `GET`/`POST`,
    /// and the default header set.
    #[must_use]
    pub fn permissive() -> Self {
        Self::new(&default_options())
    }

    #[must_use]
    pub fn builder() -> CorsBuilder {
        CorsBuilder::new()
    }

    #[must_use]
    pub fn store(&self) -> &PolicyStore {
        &self.store
    }

    /// Replace the origin allow-list at runtime.
    pub fn refresh_origins<S: AsRef<str>>(&self, origins: &[S]) {
        self.store.refresh_origins(origins);
    }

    /// `OPTIONS` requests take the preflight path.
    #[inline]
    #[must_use]
    pub fn is_preflight<Req: CorsRequest + ?Sized>(req: &Req) -> bool {
        req.method() == "OPTIONS"
    }

    /// Evaluate a preflight and write the grant headers on success.
    ///
    /// Does not touch the status; callers answer every preflight with `200`.
    pub fn handle_preflight<Req, Res>(&self, req: &Req, res: &mut Res) -> Decision
    where
        Req: CorsRequest + ?Sized,
        Res: CorsResponse + ?Sized,
    {
        let origin = match non_empty(req.header(&ORIGIN)) {
            Some(o) => o,
            None => {
                self.logger.log(format_args!(
                    "Preflight without Origin header, allowed origins {:?}",
                    self.store.origin_snapshot().describe()
                ));
                return Decision::denied(DenialReason::MissingOrigin);
            }
        };
        if !self.store.origin_allowed(origin) {
            self.log_origin_denied(origin);
            return Decision::denied(DenialReason::Origin {
                origin: origin.to_string(),
            });
        }

        let method = req.header(&ACCESS_CONTROL_REQUEST_METHOD).unwrap_or("");
        if !self.store.method_allowed(method) {
            self.logger.log(format_args!(
                "Method {} is not in {:?}",
                method,
                self.store.allowed_methods()
            ));
            return Decision::denied(DenialReason::Method {
                method: method.to_string(),
            });
        }

        let headers = parse_header_list(req.header(&ACCESS_CONTROL_REQUEST_HEADERS));
        if !self.store.headers_allowed(&headers) {
            self.logger.log(format_args!(
                "Headers {:?} are not in {:?}",
                headers,
                self.store.allowed_headers()
            ));
            return Decision::denied(DenialReason::Headers {
                headers: headers.iter().map(|h| h.to_string()).collect(),
            });
        }

        res.set_header(ACCESS_CONTROL_ALLOW_ORIGIN, origin.to_string());
        res.set_header(ACCESS_CONTROL_ALLOW_METHODS, method.to_string());
        if !headers.is_empty() {
            res.set_header(ACCESS_CONTROL_ALLOW_HEADERS, headers.join(", "));
        }
        if self.store.allow_credentials() {
            res.set_header(ACCESS_CONTROL_ALLOW_CREDENTIALS, "true".to_string());
        }
        if let Some(age) = self.store.max_age() {
            res.set_header(ACCESS_CONTROL_MAX_AGE, age.to_string());
        }
        trace!(origin, method, "CORS preflight granted");
        Decision::Granted
    }

    /// Evaluate an actual request and write the grant headers on success.
    pub fn handle_actual<Req, Res>(&self, req: &Req, res: &mut Res) -> Decision
    where
        Req: CorsRequest + ?Sized,
        Res: CorsResponse + ?Sized,
    {
        let Some(origin) = non_empty(req.header(&ORIGIN)) else {
            return Decision::NotCors;
        };
        if !self.store.origin_allowed(origin) {
            self.log_origin_denied(origin);
            return Decision::denied(DenialReason::Origin {
                origin: origin.to_string(),
            });
        }

        res.set_header(ACCESS_CONTROL_ALLOW_ORIGIN, origin.to_string());
        let exposed = self.store.exposed_headers();
        if !exposed.is_empty() {
            res.set_header(ACCESS_CONTROL_EXPOSE_HEADERS, exposed.join(", "));
        }
        if self.store.allow_credentials() {
            res.set_header(ACCESS_CONTROL_ALLOW_CREDENTIALS, "true".to_string());
        }
        trace!(origin, method = req.method(), "CORS actual request granted");
        Decision::Granted
    }

    fn log_origin_denied(&self, origin: &str) {
        self.logger.log(format_args!(
            "Origin {} is not in {:?}",
            origin,
            self.store.origin_snapshot().describe()
        ));
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Split `Access-Control-Request-Headers` on `,`.
///
/// Tokens are kept verbatim, so `"A, B"` yields `"A"` and `" B"`. An absent
/// or empty header yields no tokens.
fn parse_header_list(value: Option<&str>) -> Vec<&str> {
    match non_empty(value) {
        Some(v) => v.split(',').collect(),
        None => Vec::new(),
    }
}
