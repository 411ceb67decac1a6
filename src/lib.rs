//! # brrtcors
//!
//! **brrtcors** is a server-side CORS (Cross-Origin Resource Sharing) policy
//! engine. It decides, per request, whether a cross-origin browser request
//! is permitted and writes the `Access-Control-*` response headers that
//! tell the browser so.
//!
//! ## Overview
//!
//! A policy is built once from [`CorsOptions`] and shared through the
//! cheaply clonable [`Cors`] handle. Requests are classified as preflights
//! (`OPTIONS`) or actual requests:
//!
//! - **Preflight** - origin, requested method and requested headers are all
//!   checked; the response is always `200` and the inner handler never runs
//! - **Actual** - only the origin is checked; the inner handler always runs
//!   and the grant headers are added to its response
//!
//! A denied request simply gets no CORS headers. Enforcement is the
//! browser's job.
//!
//! ## Architecture
//!
//! - **[`wildcard`]** - single-`*` origin patterns
//! - **[`policy`]** - the normalized [`PolicyStore`](policy::PolicyStore)
//!   and its allow checks
//! - **[`cors`]** - request classification and header writing
//! - **[`exchange`]** - the request/response seam ([`exchange::CorsRequest`],
//!   [`exchange::CorsResponse`]) with implementations for `http` types
//! - **[`middleware`]** - handler wrapping ([`middleware::CorsService`]) and
//!   a before/after middleware chain
//! - **[`config`]** - options, defaults, file and environment loading
//! - **[`logger`]** - pluggable diagnostics for denials
//! - **[`hot_reload`]** - refresh allowed origins when a config file changes
//! - **[`logging`]** - `tracing-subscriber` bootstrap for binaries
//! - **[`cli`]** - the `brrtcors` inspection tool
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtcors::exchange::{HandlerRequest, HandlerResponse};
//! use brrtcors::Cors;
//! use http::Method;
//!
//! let cors = Cors::builder()
//!     .allowed_origins(["https://*.example.com"])
//!     .allowed_methods([Method::GET, Method::PUT])
//!     .build();
//!
//! let service = cors.wrap(|_req: &HandlerRequest| HandlerResponse::default());
//! let req = HandlerRequest::new(Method::GET, "/pets")
//!     .with_header("Origin", "https://app.example.com");
//! let (res, decision) = service.call_with_decision(&req);
//! assert!(decision.is_granted());
//! assert_eq!(
//!     res.get_header("Access-Control-Allow-Origin"),
//!     Some("https://app.example.com")
//! );
//! ```
//!
//! ## Runtime Origin Refresh
//!
//! [`Cors::refresh_origins`] swaps the origin allow-list atomically while
//! requests are in flight; every request sees either the old or the new list
//! in full. [`hot_reload::watch_origins`] drives it from a config file.

pub mod cli;
pub mod config;
pub mod cors;
pub mod exchange;
pub mod hot_reload;
pub mod logger;
pub mod logging;
pub mod middleware;
pub mod policy;
pub mod wildcard;

pub use config::{default_options, ConfigError, CorsOptions};
pub use cors::{Cors, CorsBuilder, Decision, DenialReason};
pub use logger::{CorsLogger, OffLogger, TracingLogger, WriterLogger};
pub use middleware::{CorsMiddleware, CorsService};
