use std::sync::Arc;

use http::{HeaderName, Method};
use serde_json::Value;
use smallvec::SmallVec;

use super::{CorsRequest, CorsResponse};

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the hot path
///
/// Header names use `Arc<str>` so repeated names clone in O(1).
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Minimal request representation handed to handlers and middleware
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path
    pub path: String,
    /// HTTP headers (stack-allocated for ≤16 headers)
    pub headers: HeaderVec,
}

impl HandlerRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderVec::new(),
        }
    }

    /// Append a header, builder style.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response produced by a handler or short-circuited by middleware
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderVec,
    /// Response body
    pub body: Value,
}

impl Default for HandlerResponse {
    fn default() -> Self {
        Self::new(200, HeaderVec::new(), Value::Null)
    }
}

impl HandlerResponse {
    /// Create a new response with the given status, headers, and body
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with a content-type header
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

impl CorsRequest for HandlerRequest {
    fn method(&self) -> &str {
        self.method.as_str()
    }

    fn header(&self, name: &HeaderName) -> Option<&str> {
        self.get_header(name.as_str())
    }
}

impl CorsResponse for HandlerResponse {
    fn set_header(&mut self, name: HeaderName, value: String) {
        HandlerResponse::set_header(self, name.as_str(), value);
    }

    fn set_status(&mut self, status: u16) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_headers_are_case_insensitive() {
        let req = HandlerRequest::new(Method::GET, "/").with_header("Origin", "https://a.com");
        assert_eq!(req.get_header("origin"), Some("https://a.com"));
        assert_eq!(CorsRequest::header(&req, &http::header::ORIGIN), Some("https://a.com"));
        assert_eq!(CorsRequest::method(&req), "GET");
    }

    #[test]
    fn set_header_replaces_existing() {
        let mut res = HandlerResponse::json(200, Value::Null);
        res.set_header("Content-Type", "text/plain".into());
        assert_eq!(res.headers.len(), 1);
        assert_eq!(res.get_header("content-type"), Some("text/plain"));
    }

    #[test]
    fn default_response_is_empty_ok() {
        let res = HandlerResponse::default();
        assert_eq!(res.status, 200);
        assert!(res.headers.is_empty());
        assert_eq!(res.body, Value::Null);
    }
}
