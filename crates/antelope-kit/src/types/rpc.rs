//! RPC response types.
//!
//! Most endpoints return raw `serde_json::Value`s. The types here cover the
//! few places where the client reshapes a response, plus a typed view of the
//! structured errors the node sends inside HTTP 500 bodies.

use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// NodeReply
// ============================================================================

/// Result of an endpoint whose response the client reshapes.
///
/// When the node answers with the expected fields the decoded value is
/// returned as [`NodeReply::Data`]. Otherwise the body is handed back
/// untouched as [`NodeReply::Raw`]; this is how structured node errors
/// (e.g. an unknown table) reach the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeReply<T> {
    Data(T),
    Raw(Value),
}

impl<T> NodeReply<T> {
    pub fn is_data(&self) -> bool {
        matches!(self, NodeReply::Data(_))
    }

    /// Consume the reply, keeping only decoded data.
    pub fn data(self) -> Option<T> {
        match self {
            NodeReply::Data(data) => Some(data),
            NodeReply::Raw(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&T> {
        match self {
            NodeReply::Data(data) => Some(data),
            NodeReply::Raw(_) => None,
        }
    }

    /// The passthrough body, if the node did not answer as expected.
    pub fn raw(&self) -> Option<&Value> {
        match self {
            NodeReply::Data(_) => None,
            NodeReply::Raw(value) => Some(value),
        }
    }

    /// Typed view of the passthrough body, if it is a node error.
    pub fn node_error(&self) -> Option<NodeError> {
        self.raw().and_then(NodeError::from_value)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> NodeReply<U> {
        match self {
            NodeReply::Data(data) => NodeReply::Data(f(data)),
            NodeReply::Raw(value) => NodeReply::Raw(value),
        }
    }
}

// ============================================================================
// Node errors
// ============================================================================

/// Structured error body returned by the node with HTTP 500.
///
/// ```json
/// {
///   "code": 500,
///   "message": "Internal Service Error",
///   "error": {
///     "code": 3060003,
///     "name": "contract_table_query_exception",
///     "what": "Contract Table Query Exception",
///     "details": [{"message": "Table xxx is not specified in the ABI", ...}]
///   }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NodeError {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    pub error: NodeErrorInfo,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NodeErrorInfo {
    pub code: i64,
    pub name: String,
    #[serde(default)]
    pub what: String,
    #[serde(default)]
    pub details: Vec<NodeErrorDetail>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NodeErrorDetail {
    pub message: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub line_number: u64,
    #[serde(default)]
    pub method: String,
}

impl NodeError {
    /// Interpret a response body as a node error.
    ///
    /// Returns `None` for bodies that are not shaped like one.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.get("error")?;
        NodeError::deserialize(value).ok()
    }

    /// Message of the first detail entry, which usually names the culprit.
    pub fn detail_message(&self) -> Option<&str> {
        self.error.details.first().map(|d| d.message.as_str())
    }
}

// ============================================================================
// Reshaped responses
// ============================================================================

/// Response of `get_raw_code_and_abi` with its base64 fields decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCodeAndAbi {
    pub account_name: String,
    /// Contract WebAssembly, empty when no contract is deployed.
    pub wasm: Vec<u8>,
    /// Binary-serialized ABI.
    pub abi: Vec<u8>,
}
