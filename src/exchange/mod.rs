//! Request/response boundary.
//!
//! The CORS engine never sees a full HTTP message. It reads the method and
//! a few request headers through [`CorsRequest`] and writes headers and a
//! status through [`CorsResponse`]. Implementations are provided for the
//! crate's own [`HandlerRequest`]/[`HandlerResponse`] and for
//! `http::Request<B>`/`http::Response<B>`; other servers plug in by
//! implementing the two traits.

mod core;
mod interop;

pub use core::{HandlerRequest, HandlerResponse, HeaderVec, MAX_INLINE_HEADERS};

use http::HeaderName;

/// Read access to an incoming request.
pub trait CorsRequest {
    /// Request method as sent on the wire.
    fn method(&self) -> &str;

    /// First value of the named header, if present and valid text.
    fn header(&self, name: &HeaderName) -> Option<&str>;
}

/// Write access to an outgoing response.
pub trait CorsResponse {
    /// Set a header, replacing any existing value.
    fn set_header(&mut self, name: HeaderName, value: String);

    /// Overwrite the status code.
    fn set_status(&mut self, status: u16);
}
