//! Low-level request executor for the chain API.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::Url;
use serde_json::Value;

use crate::error::RpcError;
use crate::transport::{BasicAuth, Connector, HttpRequest, HttpResponse, Transport};

use super::session::{ConnectionManager, OpenError};

/// `user-agent` sent unless the caller overrides it.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Low-level client performing exactly one round trip per call.
///
/// No retries are attempted; any resilience policy belongs to the caller.
pub struct RpcClient {
    host: Url,
    headers: BTreeMap<String, String>,
    auth: Option<BasicAuth>,
    connections: ConnectionManager,
}

impl RpcClient {
    pub(crate) fn new(
        host: Url,
        headers: BTreeMap<String, String>,
        auth: Option<BasicAuth>,
        connector: Arc<dyn Connector>,
        transport: Option<Arc<dyn Transport>>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        Self {
            host,
            headers,
            auth,
            connections: ConnectionManager::new(connector, transport),
        }
    }

    /// The validated host every endpoint is joined against.
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Custom headers, with lower-cased names.
    pub fn custom_headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn auth(&self) -> Option<&BasicAuth> {
        self.auth.as_ref()
    }

    /// Headers actually sent: the defaults overlaid with the custom ones.
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::from([
            ("user-agent".to_string(), USER_AGENT.to_string()),
            ("content-type".to_string(), "application/json".to_string()),
        ]);
        headers.extend(self.headers.clone());
        headers
    }

    /// POST `payload` to `endpoint` and return the parsed body.
    ///
    /// Top-level `null` values are removed from object payloads, and a
    /// `null` payload is sent as `{}`. Statuses up to 299, and exactly 500,
    /// yield the parsed body; the node reports structured errors with 500.
    /// Every other status, and every transport failure, is an
    /// [`RpcError::Connection`].
    pub fn call(&self, endpoint: &str, payload: Value) -> Result<Value, RpcError> {
        let url = self.url_for(endpoint)?;
        let payload = strip_nulls(payload);

        let request = HttpRequest {
            url,
            headers: self.headers(),
            body: payload,
            auth: self.auth.clone(),
        };
        let url = request.url.as_str();

        tracing::debug!(%url, "posting request");

        let response = self
            .connections
            .acquire()
            .and_then(|lease| lease.transport().post(&request))
            .map_err(|e| RpcError::transport(url, &request.body, e))?;

        classify(url, &request.body, response)
    }

    /// Full URL of `endpoint` on this host.
    pub fn url_for(&self, endpoint: &str) -> Result<Url, RpcError> {
        self.host
            .join(endpoint)
            .map_err(|e| RpcError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
    }

    pub(crate) fn open(&self) -> Result<(), OpenError> {
        self.connections.open()
    }

    pub(crate) fn release(&self) {
        self.connections.release()
    }

    pub(crate) fn is_released(&self) -> bool {
        self.connections.is_released()
    }

    pub(crate) fn in_session(&self) -> bool {
        self.connections.is_scoped()
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("host", &self.host.as_str())
            .field("headers", &self.headers)
            .field("auth", &self.auth)
            .finish()
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Remove top-level `null` values; the node treats an explicit `null`
/// differently from an omitted key.
fn strip_nulls(payload: Value) -> Value {
    match payload {
        Value::Null => Value::Object(Default::default()),
        Value::Object(map) => Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => other,
    }
}

/// Statuses that become errors rather than data.
fn is_rejected_status(status: u16) -> bool {
    status > 299 && status != 500
}

fn classify(url: &str, payload: &Value, response: HttpResponse) -> Result<Value, RpcError> {
    tracing::trace!(%url, status = response.status, "classifying response");

    if is_rejected_status(response.status) {
        return Err(RpcError::rejected(url, payload, response));
    }

    response
        .json()
        .map_err(|e| RpcError::invalid_response(url, format!("body is not valid JSON: {e}")))
}
