//! Error types for dispatched requests
//!
//! Failures cross task boundaries only as data: every task recovers its own
//! error locally and reports it through its `Outcome`, so a failing request
//! never panics the dispatching caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload of a failed dispatch outcome.
///
/// Messages are captured as owned strings because `reqwest::Error` is not
/// `Clone`; each variant retains the URL the request was issued against.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DispatchError {
    /// Connection, DNS, or TLS failure before any response was obtained.
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// Failure while consuming the response body after a response arrived.
    #[error("failed to read response body from {url}: {message}")]
    Read { url: String, message: String },

    /// A dispatched task terminated without reporting an outcome.
    ///
    /// Does not occur in normal operation; it exists so a batch always
    /// yields one outcome per input even if a task panics.
    #[error("dispatch task for {url} terminated without a result: {message}")]
    Task { url: String, message: String },
}

impl DispatchError {
    /// Build a transport error from a request failure.
    pub fn transport(url: &str, err: &reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// Build a read error from a body-consumption failure.
    pub fn read(url: &str, err: &reqwest::Error) -> Self {
        Self::Read {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// The URL of the request that produced this error.
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. } | Self::Read { url, .. } | Self::Task { url, .. } => url,
        }
    }
}
