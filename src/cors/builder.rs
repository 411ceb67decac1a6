use std::sync::Arc;

use super::Cors;
use crate::config::CorsOptions;
use crate::logger::CorsLogger;

/// Builder for creating [`Cors`] with a fluent API
///
/// Starts from an empty [`CorsOptions`]: every origin allowed, default
/// methods and headers, no credentials, no max-age.
///
/// # Example
///
/// ```rust
/// use brrtcors::cors::Cors;
/// use http::Method;
///
/// let cors = Cors::builder()
///     .allowed_origins(["https://example.com", "https://*.example.org"])
///     .allowed_methods([Method::GET, Method::POST, Method::PUT])
///     .allowed_headers(["Content-Type", "Authorization"])
///     .allow_credentials(true)
///     .expose_headers(["X-Total-Count"])
///     .max_age(3600)
///     .build();
/// assert!(cors.store().origin_allowed("https://api.example.org"));
/// ```
#[derive(Default)]
pub struct CorsBuilder {
    options: CorsOptions,
    logger: Option<Arc<dyn CorsLogger>>,
}

fn owned<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().map(|s| s.as_ref().to_string()).collect()
}

impl CorsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing options value.
    #[must_use]
    pub fn from_options(options: CorsOptions) -> Self {
        Self {
            options,
            logger: None,
        }
    }

    /// Set allowed origins
    ///
    /// Exact origins compare case-insensitively. `*` allows every origin and
    /// overrides the other entries; an entry such as `https://*.example.com`
    /// matches by prefix and suffix.
    #[must_use]
    pub fn allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.allowed_origins = owned(origins);
        self
    }

    /// Set allowed methods (accepts `http::Method` or strings)
    #[must_use]
    pub fn allowed_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.allowed_methods = owned(methods);
        self
    }

    /// Set allowed request headers; `*` allows any
    #[must_use]
    pub fn allowed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.allowed_headers = owned(headers);
        self
    }

    /// Set headers exposed to scripts on actual responses
    #[must_use]
    pub fn expose_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.exposed_headers = owned(headers);
        self
    }

    #[must_use]
    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.options.allow_credentials = allow;
        self
    }

    /// Set preflight cache duration in seconds
    #[must_use]
    pub fn max_age(mut self, seconds: i64) -> Self {
        self.options.max_age = seconds;
        self
    }

    /// Log denials through `tracing` (ignored when a logger is injected)
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.options.debug = enabled;
        self
    }

    /// Inject a diagnostics logger
    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn CorsLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    #[must_use]
    pub fn build(self) -> Cors {
        match self.logger {
            Some(logger) => Cors::with_logger(&self.options, logger),
            None => Cors::new(&self.options),
        }
    }
}
