//! Decision predicates over a [`PolicyStore`].
//!
//! Origins compare case-insensitively; methods and headers compare
//! byte-for-byte against the configured lists. None of these can fail:
//! odd input (an empty origin, an unknown method) is simply not allowed.

use super::store::{OriginPolicy, PolicyStore};

impl OriginPolicy {
    /// Test an origin that is already lower-cased.
    #[inline]
    pub(crate) fn allows_normalized(&self, origin: &str) -> bool {
        self.allow_all
            || self.exact.contains(origin)
            || self.wildcards.iter().any(|w| w.matches(origin))
    }
}

impl PolicyStore {
    /// Whether `origin` passes the current origin allow-list.
    #[must_use]
    pub fn origin_allowed(&self, origin: &str) -> bool {
        let origins = self.origins.load();
        if origins.allow_all {
            return true;
        }
        origins.allows_normalized(&origin.to_lowercase())
    }

    /// Whether `method` may be requested in a preflight.
    ///
    /// `OPTIONS` is always allowed.
    #[must_use]
    pub fn method_allowed(&self, method: &str) -> bool {
        if self.allowed_methods.is_empty() {
            return false;
        }
        if method == "OPTIONS" {
            return true;
        }
        self.allowed_methods.iter().any(|m| m == method)
    }

    /// Whether every requested header is allowed.
    ///
    /// A single unknown header fails the whole request.
    #[must_use]
    pub fn headers_allowed<S: AsRef<str>>(&self, requested: &[S]) -> bool {
        if self.allow_all_headers || requested.is_empty() {
            return true;
        }
        requested
            .iter()
            .all(|r| self.allowed_headers.iter().any(|h| h == r.as_ref()))
    }
}
