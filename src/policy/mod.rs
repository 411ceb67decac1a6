//! # Policy Module
//!
//! Normalized CORS policy state ([`PolicyStore`]) and the decision
//! predicates evaluated against it.
//!
//! ## Hot Path
//!
//! `origin_allowed`, `method_allowed` and `headers_allowed` run once per
//! request and never lock. The origin allow-list is an immutable
//! [`OriginPolicy`] held in an `ArcSwap`; a refresh publishes a new snapshot
//! with one atomic store.
//!
//! ```rust
//! use brrtcors::config::CorsOptions;
//! use brrtcors::policy::PolicyStore;
//!
//! let store = PolicyStore::build(&CorsOptions {
//!     allowed_origins: vec!["https://*.example.com".into()],
//!     ..CorsOptions::default()
//! });
//! assert!(store.origin_allowed("https://app.example.com"));
//! assert!(!store.origin_allowed("https://example.org"));
//!
//! store.refresh_origins(&["https://example.org"]);
//! assert!(store.origin_allowed("https://example.org"));
//! ```

mod engine;
mod store;

pub use store::{OriginPolicy, PolicyStore, PolicySummary};
