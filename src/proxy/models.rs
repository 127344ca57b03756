//! Probe data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque proxy endpoint string (`host:port`, optionally with a scheme).
///
/// The address is never parsed here; it is handed verbatim to the HTTP
/// client's proxy binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyAddress(String);

impl ProxyAddress {
    /// Create a new proxy address from any string-like value
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The raw address string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProxyAddress {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for ProxyAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}

impl fmt::Display for ProxyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a probe classified a proxy as not working.
///
/// Informational only; nothing branches on the variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InvalidReason {
    /// The target answered with a status other than 200
    UnexpectedStatus(u16),
    /// The request did not complete within the probe timeout
    TimedOut,
    /// Transport-level failure (connect, DNS, TLS, malformed response)
    RequestFailed(String),
    /// The probe task itself died before producing an outcome
    TaskFailed,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::UnexpectedStatus(code) => write!(f, "unexpected status {}", code),
            InvalidReason::TimedOut => write!(f, "timed out"),
            InvalidReason::RequestFailed(error) => write!(f, "request failed: {}", error),
            InvalidReason::TaskFailed => write!(f, "probe task failed"),
        }
    }
}

/// Result of probing a single proxy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProbeOutcome {
    /// The proxy relayed the test request and the target answered 200
    Valid(ProxyAddress),
    /// The probe failed; the reason is kept for logging only
    Invalid {
        address: ProxyAddress,
        reason: InvalidReason,
    },
}

impl ProbeOutcome {
    pub fn valid(address: ProxyAddress) -> Self {
        Self::Valid(address)
    }

    pub fn invalid(address: ProxyAddress, reason: InvalidReason) -> Self {
        Self::Invalid { address, reason }
    }

    /// The address this outcome refers to
    pub fn address(&self) -> &ProxyAddress {
        match self {
            Self::Valid(address) => address,
            Self::Invalid { address, .. } => address,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}
