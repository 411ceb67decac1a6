use std::collections::BTreeSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use tracing::info;

use crate::config::{CorsOptions, DEFAULT_ALLOWED_HEADERS, DEFAULT_ALLOWED_METHODS};
use crate::wildcard::WildcardPattern;

/// Normalized origin allow-list
///
/// Immutable once built. [`PolicyStore::refresh_origins`] replaces the whole
/// snapshot, so readers always see a consistent `allow_all` / exact /
/// wildcard triple.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginPolicy {
    pub(crate) allow_all: bool,
    pub(crate) exact: BTreeSet<String>,
    pub(crate) wildcards: Vec<WildcardPattern>,
}

impl OriginPolicy {
    /// Normalize a configured origin list.
    ///
    /// An empty list, or any `*` entry, allows every origin and discards the
    /// other entries. Entries are lower-cased; those containing `*` become
    /// [`WildcardPattern`]s in configured order.
    pub fn from_origins<S: AsRef<str>>(origins: &[S]) -> Self {
        if origins.is_empty() {
            return Self::allow_all();
        }
        let mut policy = Self::default();
        for origin in origins {
            let origin = origin.as_ref().to_lowercase();
            if origin == "*" {
                return Self::allow_all();
            }
            match WildcardPattern::parse(&origin) {
                Some(pattern) => policy.wildcards.push(pattern),
                None => {
                    policy.exact.insert(origin);
                }
            }
        }
        policy
    }

    fn allow_all() -> Self {
        Self {
            allow_all: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_allow_all(&self) -> bool {
        self.allow_all
    }

    #[must_use]
    pub fn exact(&self) -> &BTreeSet<String> {
        &self.exact
    }

    #[must_use]
    pub fn wildcards(&self) -> &[WildcardPattern] {
        &self.wildcards
    }

    /// Human-readable allow-list used in denial diagnostics.
    pub(crate) fn describe(&self) -> Vec<String> {
        if self.allow_all {
            return vec!["*".to_string()];
        }
        self.exact
            .iter()
            .cloned()
            .chain(self.wildcards.iter().map(ToString::to_string))
            .collect()
    }
}

/// Runtime CORS policy
///
/// Built once from [`CorsOptions`]. Only the origin snapshot can change
/// afterwards, through [`refresh_origins`](Self::refresh_origins); every
/// other field is fixed for the store's lifetime.
#[derive(Debug)]
pub struct PolicyStore {
    pub(crate) origins: ArcSwap<OriginPolicy>,
    pub(crate) allow_all_headers: bool,
    pub(crate) allowed_headers: Vec<String>,
    pub(crate) allowed_methods: Vec<String>,
    pub(crate) exposed_headers: Vec<String>,
    pub(crate) allow_credentials: bool,
    pub(crate) max_age: i64,
}

impl PolicyStore {
    /// Normalize `options` into a store.
    ///
    /// Empty headers fall back to [`DEFAULT_ALLOWED_HEADERS`] without
    /// enabling allow-all; a literal `*` header enables allow-all. Empty
    /// methods fall back to [`DEFAULT_ALLOWED_METHODS`].
    #[must_use]
    pub fn build(options: &CorsOptions) -> Self {
        let origins = OriginPolicy::from_origins(&options.allowed_origins);

        let (allowed_headers, allow_all_headers) = if options.allowed_headers.is_empty() {
            (
                DEFAULT_ALLOWED_HEADERS.iter().map(|h| h.to_string()).collect(),
                false,
            )
        } else {
            let all = options.allowed_headers.iter().any(|h| h == "*");
            (options.allowed_headers.clone(), all)
        };

        let allowed_methods = if options.allowed_methods.is_empty() {
            DEFAULT_ALLOWED_METHODS.iter().map(|m| m.to_string()).collect()
        } else {
            options.allowed_methods.clone()
        };

        info!(
            allow_all_origins = origins.allow_all,
            exact_origins = origins.exact.len(),
            wildcard_origins = origins.wildcards.len(),
            allow_all_headers,
            methods = ?allowed_methods,
            allow_credentials = options.allow_credentials,
            max_age = options.max_age,
            "CORS policy built"
        );

        Self {
            origins: ArcSwap::from_pointee(origins),
            allow_all_headers,
            allowed_headers,
            allowed_methods,
            exposed_headers: options.exposed_headers.clone(),
            allow_credentials: options.allow_credentials,
            max_age: options.max_age,
        }
    }

    /// Replace the origin allow-list.
    ///
    /// The new snapshot is built off to the side and published with a
    /// single atomic store; concurrent readers see either the old or the
    /// new list, never a mix.
    pub fn refresh_origins<S: AsRef<str>>(&self, origins: &[S]) {
        let next = OriginPolicy::from_origins(origins);
        info!(
            allow_all_origins = next.allow_all,
            exact_origins = next.exact.len(),
            wildcard_origins = next.wildcards.len(),
            "CORS origins refreshed"
        );
        self.origins.store(Arc::new(next));
    }

    /// Current origin snapshot.
    #[must_use]
    pub fn origin_snapshot(&self) -> Arc<OriginPolicy> {
        self.origins.load_full()
    }

    #[must_use]
    pub fn allowed_headers(&self) -> &[String] {
        &self.allowed_headers
    }

    #[must_use]
    pub fn allows_all_headers(&self) -> bool {
        self.allow_all_headers
    }

    #[must_use]
    pub fn allowed_methods(&self) -> &[String] {
        &self.allowed_methods
    }

    #[must_use]
    pub fn exposed_headers(&self) -> &[String] {
        &self.exposed_headers
    }

    #[must_use]
    pub fn allow_credentials(&self) -> bool {
        self.allow_credentials
    }

    /// Preflight cache lifetime, `None` when unset.
    #[must_use]
    pub fn max_age(&self) -> Option<i64> {
        (self.max_age > 0).then_some(self.max_age)
    }

    /// Serializable view of the whole policy.
    #[must_use]
    pub fn summary(&self) -> PolicySummary {
        let origins = self.origins.load();
        PolicySummary {
            allow_all_origins: origins.allow_all,
            exact_origins: origins.exact.iter().cloned().collect(),
            wildcard_origins: origins.wildcards.iter().map(ToString::to_string).collect(),
            allow_all_headers: self.allow_all_headers,
            allowed_headers: self.allowed_headers.clone(),
            allowed_methods: self.allowed_methods.clone(),
            exposed_headers: self.exposed_headers.clone(),
            allow_credentials: self.allow_credentials,
            max_age: self.max_age(),
        }
    }
}

/// Point-in-time view of a [`PolicyStore`], suitable for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicySummary {
    pub allow_all_origins: bool,
    pub exact_origins: Vec<String>,
    pub wildcard_origins: Vec<String>,
    pub allow_all_headers: bool,
    pub allowed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age: Option<i64>,
}
