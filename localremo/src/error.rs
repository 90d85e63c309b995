//! Error types for discovery and the device API

use std::fmt;
use std::path::PathBuf;
use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for localremo operations
pub type Result<T> = std::result::Result<T, Error>;

/// The request a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Submit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Fetch => f.write_str("GET /messages"),
            Operation::Submit => f.write_str("POST /messages"),
        }
    }
}

/// Why a request scope fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Cancelled,
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Cancelled => f.write_str("request cancelled"),
            CancelReason::DeadlineExceeded => f.write_str("request deadline exceeded"),
        }
    }
}

/// Errors that can occur while locating or talking to a device
#[derive(Debug, Error)]
pub enum Error {
    /// The mDNS daemon could not be created or the browse could not start
    #[error("mDNS resolver unavailable: {0}")]
    DiscoveryUnavailable(#[source] mdns_sd::Error),

    /// The HTTP client could not be set up
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The device could not be reached or the connection broke
    #[error("{operation} failed to reach device: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// The device answered with something other than 200
    #[error("{operation}: response status is not OK ({status})")]
    Status {
        operation: Operation,
        status: StatusCode,
    },

    /// Bytes that should hold an IR signal do not
    #[error("{origin} is not a valid IR signal: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// A signal could not be serialized for saving
    #[error("failed to encode IR signal: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request scope was cancelled or ran out of time
    #[error("{operation}: {reason}")]
    Cancelled {
        operation: Operation,
        reason: CancelReason,
    },

    /// Reading or writing a signal file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flat classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DiscoveryUnavailable,
    HttpClient,
    Transport,
    Status,
    Decode,
    Encode,
    Cancelled,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DiscoveryUnavailable(_) => ErrorKind::DiscoveryUnavailable,
            Error::HttpClient(_) => ErrorKind::HttpClient,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Status { .. } => ErrorKind::Status,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Encode(_) => ErrorKind::Encode,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::Io { .. } => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_names_operation() {
        let err = Error::Status {
            operation: Operation::Submit,
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("POST /messages"));
        assert!(msg.contains("response status is not OK"));
        assert!(msg.contains("500"));
        assert_eq!(err.kind(), ErrorKind::Status);
    }

    #[test]
    fn test_discovery_unavailable_message() {
        let err = Error::DiscoveryUnavailable(mdns_sd::Error::Msg("no usable interface".to_string()));
        let msg = err.to_string();
        assert!(msg.starts_with("mDNS resolver unavailable: "));
        assert!(msg.contains("no usable interface"));
        assert_eq!(err.kind(), ErrorKind::DiscoveryUnavailable);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_decode_and_encode_are_distinct() {
        let source = || serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let decode = Error::Decode { origin: "tv.json".to_string(), source: source() };
        let encode = Error::Encode(source());

        assert_eq!(decode.kind(), ErrorKind::Decode);
        assert!(decode.to_string().starts_with("tv.json is not a valid IR signal"));
        assert_eq!(encode.kind(), ErrorKind::Encode);
        assert!(encode.to_string().starts_with("failed to encode IR signal"));
    }

    #[test]
    fn test_cancel_message_distinguishes_deadline() {
        let cancelled = Error::Cancelled {
            operation: Operation::Fetch,
            reason: CancelReason::Cancelled,
        };
        let expired = Error::Cancelled {
            operation: Operation::Fetch,
            reason: CancelReason::DeadlineExceeded,
        };
        assert_eq!(cancelled.to_string(), "GET /messages: request cancelled");
        assert_eq!(expired.to_string(), "GET /messages: request deadline exceeded");
    }
}
