#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use brrtcors::exchange::HandlerRequest;
use http::Method;

/// `io::Write` sink whose contents stay readable after being moved into a logger.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn preflight(origin: &str, method: &str, headers: Option<&str>) -> HandlerRequest {
    let mut req = HandlerRequest::new(Method::OPTIONS, "/items")
        .with_header("Origin", origin)
        .with_header("Access-Control-Request-Method", method);
    if let Some(h) = headers {
        req = req.with_header("Access-Control-Request-Headers", h);
    }
    req
}

pub mod temp_files {
    use std::io::Write;

    /// Write `content` to a temp file with the given extension.
    pub fn create(content: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}
