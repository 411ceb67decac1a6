use std::fmt;

use serde::Serialize;

/// Outcome of running a request through the CORS engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    /// CORS headers were written
    Granted,
    /// No `Origin` header on an actual request; nothing to do
    NotCors,
    /// A check failed; no CORS headers were written
    Denied {
        /// Which check failed
        reason: DenialReason,
    },
}

impl Decision {
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }

    pub(crate) fn denied(reason: DenialReason) -> Self {
        Decision::Denied { reason }
    }
}

/// Why a request was denied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum DenialReason {
    /// Preflight carried no `Origin` header
    MissingOrigin,
    /// `Origin` is not on the allow-list
    Origin { origin: String },
    /// `Access-Control-Request-Method` is not allowed
    Method { method: String },
    /// At least one `Access-Control-Request-Headers` entry is not allowed
    Headers { headers: Vec<String> },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::MissingOrigin => write!(f, "preflight without Origin header"),
            DenialReason::Origin { origin } => write!(f, "origin '{origin}' not allowed"),
            DenialReason::Method { method } => write!(f, "method '{method}' not allowed"),
            DenialReason::Headers { headers } => write!(f, "headers {headers:?} not allowed"),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Granted => write!(f, "granted"),
            Decision::NotCors => write!(f, "not a CORS request"),
            Decision::Denied { reason } => write!(f, "denied: {reason}"),
        }
    }
}
