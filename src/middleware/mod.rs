//! # Middleware Module
//!
//! Adapters that place the CORS engine in front of application handlers.
//!
//! - [`CorsService`] wraps any [`Handler`] (including plain closures over
//!   `http::Request` / `http::Response`) via [`Cors::wrap`](crate::cors::Cors::wrap).
//! - [`CorsMiddleware`] implements the [`Middleware`] hook trait and runs
//!   inside a [`MiddlewareChain`] with other hooks.
//!
//! Both follow the same contract: `OPTIONS` is answered with `200` without
//! calling the handler; every other method calls the handler and then adds
//! the CORS grant headers.

mod chain;
mod core;
mod cors;
mod service;

pub use chain::MiddlewareChain;
pub use core::Middleware;
pub use cors::CorsMiddleware;
pub use service::{CorsService, Handler};
