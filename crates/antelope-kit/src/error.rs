//! Error types for antelope-kit.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error): Main error type, returned by most operations
//!   - [`RpcError`]: failures of a single call or pagination run
//!     - [`TransportError`]: what the HTTP transport itself reported
//! - [`ParseNetworkError`]: unknown network preset name
//!
//! Structured errors returned by the node inside an HTTP 500 body are *not*
//! errors here: they come back as ordinary JSON data. See
//! [`NodeError`](crate::types::NodeError) for a typed view of such bodies.
//!
//! # Error Handling Examples
//!
//! ```rust,no_run
//! use antelope_kit::*;
//!
//! # fn example() -> Result<(), Error> {
//! let net = Net::builder(Network::Local).build()?;
//!
//! match net.get_info() {
//!     Ok(info) => println!("chain id: {}", info["chain_id"]),
//!     Err(Error::Rpc(RpcError::Connection { url, .. })) => {
//!         println!("node at {url} is unreachable")
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::transport::HttpResponse;

/// Error parsing a network preset name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown network preset: '{0}'")]
pub struct ParseNetworkError(pub String);

// ============================================================================
// Transport Errors
// ============================================================================

/// Errors reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to write request: {0}")]
    Write(String),

    /// The request could not be built, so nothing was sent.
    #[error("Invalid request: {0}")]
    Builder(String),

    /// The transport was closed by its owner and refuses further requests.
    #[error("Transport is closed")]
    Closed,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            TransportError::Builder(err.to_string())
        } else if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Network(err.to_string())
        } else if err.is_request() || err.is_body() {
            TransportError::Write(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

// ============================================================================
// RPC Errors
// ============================================================================

/// Failures of a single RPC call or of a pagination run.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The transport failed, or the node answered with a status outside the
    /// accepted range (anything above 299 except 500).
    #[error("Connection error on {url}: {}", connection_detail(response.as_ref(), source.as_ref()))]
    Connection {
        url: String,
        payload: Value,
        response: Option<HttpResponse>,
        source: Option<TransportError>,
    },

    /// A call was attempted after the owning session released the transport.
    #[error("Transport used after its session was closed")]
    UseAfterClose,

    /// A full-table read did not converge within the request cap.
    #[error("Too many requests (>{requests}) for table")]
    TooManyRequests { requests: usize },

    /// The endpoint path could not be joined onto the host.
    #[error("Invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// The transport refused to build the request.
    #[error("Invalid request to {url}: {message}")]
    InvalidRequest { url: String, message: String },

    /// The node answered with an accepted status but an unusable body.
    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

impl RpcError {
    /// Returns true for transport failures and rejected HTTP statuses.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, RpcError::Connection { .. })
    }

    /// Returns true if the call was made after its session was released.
    pub fn is_use_after_close(&self) -> bool {
        matches!(self, RpcError::UseAfterClose)
    }

    /// HTTP status of the rejected response, if the node answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RpcError::Connection {
                response: Some(response),
                ..
            } => Some(response.status),
            _ => None,
        }
    }

    /// URL of the failed request, when known.
    pub fn url(&self) -> Option<&str> {
        match self {
            RpcError::Connection { url, .. }
            | RpcError::InvalidRequest { url, .. }
            | RpcError::InvalidResponse { url, .. } => Some(url),
            _ => None,
        }
    }

    pub(crate) fn transport(url: &str, payload: &Value, source: TransportError) -> Self {
        match source {
            TransportError::Closed => return RpcError::UseAfterClose,
            TransportError::Builder(message) => {
                return RpcError::InvalidRequest {
                    url: url.to_string(),
                    message,
                };
            }
            _ => {}
        }
        RpcError::Connection {
            url: url.to_string(),
            payload: payload.clone(),
            response: None,
            source: Some(source),
        }
    }

    pub(crate) fn rejected(url: &str, payload: &Value, response: HttpResponse) -> Self {
        RpcError::Connection {
            url: url.to_string(),
            payload: payload.clone(),
            response: Some(response),
            source: None,
        }
    }

    pub(crate) fn invalid_response(url: &str, message: impl Into<String>) -> Self {
        RpcError::InvalidResponse {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

fn connection_detail(response: Option<&HttpResponse>, source: Option<&TransportError>) -> String {
    match (response, source) {
        (_, Some(source)) => source.to_string(),
        (Some(response), None) => format!("HTTP {}: {}", response.status, response.body),
        (None, None) => "unknown failure".to_string(),
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for antelope-kit operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Configuration ───
    #[error("Invalid host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    // ─── RPC ───
    #[error(transparent)]
    Rpc(#[from] RpcError),

    // ─── Decoding ───
    #[error("Failed to decode field '{field}': {message}")]
    Decode { field: &'static str, message: String },
}

impl Error {
    pub(crate) fn decode(field: &'static str, err: impl std::fmt::Display) -> Self {
        Error::Decode {
            field,
            message: err.to_string(),
        }
    }
}
