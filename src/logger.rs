//! Denial diagnostics.
//!
//! The policy engine reports why a request was not granted through a
//! [`CorsLogger`] injected at construction. The decision code calls the
//! logger unconditionally; whether anything is recorded depends on which
//! implementation was injected.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use tracing::{debug, info};

/// Sink for denial diagnostics.
pub trait CorsLogger: Send + Sync {
    /// Record one diagnostic message built from ordered parts.
    fn log(&self, message: fmt::Arguments<'_>);
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct OffLogger;

impl CorsLogger for OffLogger {
    fn log(&self, _message: fmt::Arguments<'_>) {}
}

/// Forwards messages to `tracing` at info level under the `brrtcors::denial` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl CorsLogger for TracingLogger {
    fn log(&self, message: fmt::Arguments<'_>) {
        info!(target: "brrtcors::denial", "{}", message);
    }
}

/// Writes one `[cors] ...` line per message to any `io::Write` sink.
pub struct WriterLogger<W: Write + Send> {
    sink: Mutex<W>,
}

impl<W: Write + Send> WriterLogger<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Consume the logger and return the sink.
    pub fn into_inner(self) -> W {
        match self.sink.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> CorsLogger for WriterLogger<W> {
    fn log(&self, message: fmt::Arguments<'_>) {
        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(sink, "[cors] {message}") {
            debug!(error = %e, "dropped CORS diagnostic");
        }
    }
}

impl<W: Write + Send> fmt::Debug for WriterLogger<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterLogger").finish_non_exhaustive()
    }
}
