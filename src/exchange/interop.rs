use http::{HeaderName, HeaderValue, Request, Response, StatusCode};
use tracing::warn;

use super::{CorsRequest, CorsResponse};

impl<B> CorsRequest for Request<B> {
    fn method(&self) -> &str {
        self.method().as_str()
    }

    fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers().get(name).and_then(|v| v.to_str().ok())
    }
}

impl<B> CorsResponse for Response<B> {
    fn set_header(&mut self, name: HeaderName, value: String) {
        match HeaderValue::try_from(value) {
            Ok(v) => {
                self.headers_mut().insert(name, v);
            }
            Err(e) => warn!(header = %name, error = %e, "skipping unrepresentable CORS header value"),
        }
    }

    fn set_status(&mut self, status: u16) {
        match StatusCode::from_u16(status) {
            Ok(code) => *self.status_mut() = code,
            Err(e) => warn!(status, error = %e, "ignoring invalid status code"),
        }
    }
}
