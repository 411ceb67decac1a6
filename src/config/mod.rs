//! # Configuration Module
//!
//! CORS policy configuration: the [`CorsOptions`] value consumed at
//! construction, the [`default_options`] factory, file loading and
//! environment overrides.
//!
//! ## File Formats
//!
//! [`CorsOptions::load`] picks the parser from the file extension:
//!
//! | Extension        | Parser       |
//! |------------------|--------------|
//! | `.yaml`, `.yml`  | `serde_yaml` |
//! | `.toml`          | `toml`       |
//! | `.json`          | `serde_json` |
//!
//! Every field is optional in the file:
//!
//! ```yaml
//! allowed_origins: ["https://app.example.com", "https://*.example.org"]
//! allowed_methods: ["GET", "POST", "PUT"]
//! allowed_headers: ["Content-Type", "Authorization"]
//! exposed_headers: ["X-Total-Count"]
//! allow_credentials: true
//! max_age: 600
//! debug: false
//! ```
//!
//! ## Environment Variables
//!
//! [`CorsOptions::apply_env`] overrides file values. Lists are
//! comma-separated.
//!
//! - `BRRTR_CORS_ALLOWED_ORIGINS`
//! - `BRRTR_CORS_ALLOWED_METHODS`
//! - `BRRTR_CORS_ALLOWED_HEADERS`
//! - `BRRTR_CORS_EXPOSED_HEADERS`
//! - `BRRTR_CORS_ALLOW_CREDENTIALS` (`true`/`false`/`1`/`0`)
//! - `BRRTR_CORS_MAX_AGE` (seconds)
//! - `BRRTR_CORS_DEBUG` (`true`/`false`/`1`/`0`)

mod error;

pub use error::ConfigError;

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Headers allowed when none are configured.
pub const DEFAULT_ALLOWED_HEADERS: [&str; 3] = ["Origin", "Accept", "Content-Type"];

/// Methods allowed when none are configured.
pub const DEFAULT_ALLOWED_METHODS: [&str; 2] = ["GET", "POST"];

/// CORS policy configuration
///
/// Empty lists are meaningful: an empty `allowed_origins` allows every
/// origin, while empty `allowed_headers` / `allowed_methods` fall back to
/// [`DEFAULT_ALLOWED_HEADERS`] / [`DEFAULT_ALLOWED_METHODS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsOptions {
    /// Exact origins, `*`, or single-`*` patterns such as `https://*.example.com`
    pub allowed_origins: Vec<String>,
    /// Methods accepted in `Access-Control-Request-Method` (case-sensitive)
    pub allowed_methods: Vec<String>,
    /// Headers accepted in `Access-Control-Request-Headers` (case-sensitive, `*` = all)
    pub allowed_headers: Vec<String>,
    /// Headers listed in `Access-Control-Expose-Headers`
    pub exposed_headers: Vec<String>,
    /// Emit `Access-Control-Allow-Credentials: true`
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds; `0` or negative leaves it unset
    pub max_age: i64,
    /// Log denials through `tracing` when no logger is injected
    pub debug: bool,
}

/// Permissive starting configuration
///
/// Every call returns a fresh value: all origins, `GET`/`POST`, and the
/// default header set.
#[must_use]
pub fn default_options() -> CorsOptions {
    CorsOptions {
        allowed_origins: vec!["*".to_string()],
        allowed_methods: DEFAULT_ALLOWED_METHODS.iter().map(|m| m.to_string()).collect(),
        allowed_headers: DEFAULT_ALLOWED_HEADERS.iter().map(|h| h.to_string()).collect(),
        ..CorsOptions::default()
    }
}

impl CorsOptions {
    /// Load options from a YAML, TOML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => "yaml",
            Some("toml") => "toml",
            Some("json") => "json",
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), format, "loading CORS configuration");
        Self::parse(&content, format)
    }

    /// Parse options from a string in the named format.
    pub fn parse(content: &str, format: &'static str) -> Result<Self, ConfigError> {
        let parse_err = |message: String| ConfigError::Parse { format, message };
        match format {
            "yaml" => serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string())),
            "toml" => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
            "json" => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
            other => Err(parse_err(format!("unknown format '{other}'"))),
        }
    }

    /// Apply `BRRTR_CORS_*` overrides from the process environment.
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Apply `BRRTR_CORS_*` overrides from an arbitrary lookup.
    ///
    /// Unparseable boolean or integer values are ignored and the current
    /// value is kept.
    #[must_use]
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BRRTR_CORS_ALLOWED_ORIGINS") {
            self.allowed_origins = split_list(&v);
        }
        if let Some(v) = lookup("BRRTR_CORS_ALLOWED_METHODS") {
            self.allowed_methods = split_list(&v);
        }
        if let Some(v) = lookup("BRRTR_CORS_ALLOWED_HEADERS") {
            self.allowed_headers = split_list(&v);
        }
        if let Some(v) = lookup("BRRTR_CORS_EXPOSED_HEADERS") {
            self.exposed_headers = split_list(&v);
        }
        if let Some(v) = lookup("BRRTR_CORS_ALLOW_CREDENTIALS") {
            match parse_bool(&v) {
                Some(b) => self.allow_credentials = b,
                None => warn!(value = %v, "ignoring invalid BRRTR_CORS_ALLOW_CREDENTIALS"),
            }
        }
        if let Some(v) = lookup("BRRTR_CORS_MAX_AGE") {
            match v.trim().parse() {
                Ok(age) => self.max_age = age,
                Err(_) => warn!(value = %v, "ignoring invalid BRRTR_CORS_MAX_AGE"),
            }
        }
        if let Some(v) = lookup("BRRTR_CORS_DEBUG") {
            match parse_bool(&v) {
                Some(b) => self.debug = b,
                None => warn!(value = %v, "ignoring invalid BRRTR_CORS_DEBUG"),
            }
        }
        self
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
