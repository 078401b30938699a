use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the candela workspace.
///
/// Every failure inside a pipeline call is fatal for that call: a failed page
/// discards all progress collected so far.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CandelaError {
    /// The requested timeframe label is not in the registry.
    #[error("unsupported timeframe: {label}")]
    UnsupportedTimeframe {
        /// The label the caller asked for (e.g. "7m").
        label: String,
    },

    /// A network or HTTP failure while talking to the exchange.
    #[error("{connector} fetch failed: {msg}")]
    FetchFailed {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The exchange answered with a body of an unexpected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "ticker for BTC-USD".
        what: String,
    },

    /// The requested capability is not implemented by the connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "ticker").
        capability: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl CandelaError {
    /// Helper: build an `UnsupportedTimeframe` error for a label.
    pub fn unsupported_timeframe(label: impl Into<String>) -> Self {
        Self::UnsupportedTimeframe {
            label: label.into(),
        }
    }

    /// Helper: build a `FetchFailed` error with the connector name and message.
    pub fn fetch_failed(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::FetchFailed {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `MalformedResponse` error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Short, stable name of the error kind (e.g. `"fetch_failed"`).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedTimeframe { .. } => "unsupported_timeframe",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::MalformedResponse(_) => "malformed_response",
            Self::InvalidArg(_) => "invalid_argument",
            Self::NotFound { .. } => "not_found",
            Self::Unsupported { .. } => "unsupported",
            Self::RequestTimeout { .. } => "request_timeout",
            Self::Other(_) => "other",
        }
    }

    /// Distinct non-zero process exit code for each error kind.
    ///
    /// Intended for command-line wrappers that print the kind and cause to
    /// standard error and exit.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedTimeframe { .. } => 2,
            Self::FetchFailed { .. } => 3,
            Self::MalformedResponse(_) => 4,
            Self::InvalidArg(_) => 5,
            Self::NotFound { .. } => 6,
            Self::Unsupported { .. } => 7,
            Self::RequestTimeout { .. } => 8,
            Self::Other(_) => 1,
        }
    }

    /// Returns true for failures caused by the remote side (transport, status,
    /// body shape, deadline) rather than by the caller's input.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. } | Self::MalformedResponse(_) | Self::RequestTimeout { .. }
        )
    }
}
