//! Transport seam between the client and the HTTP stack.
//!
//! A [`Transport`] performs one blocking `POST` and reports either the raw
//! response or a [`TransportError`]. It knows nothing about status codes or
//! node semantics; classification happens in the client. A [`Connector`]
//! builds fresh transports for calls that are not bound to a long-lived
//! handle.
//!
//! [`HttpTransport`] and [`HttpConnector`] are the default implementations,
//! backed by `reqwest`'s blocking client.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::TransportError;

// ============================================================================
// Request / Response
// ============================================================================

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// An outbound `POST` described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    /// Header names are lower case.
    pub headers: BTreeMap<String, String>,
    pub body: Value,
    pub auth: Option<BasicAuth>,
}

/// A response as returned by a transport, before any classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

// ============================================================================
// Traits
// ============================================================================

/// A blocking HTTP transport.
///
/// Implementations are not required to be usable from several threads at
/// once in any meaningful way; the client never synchronizes calls made
/// through the same handle.
pub trait Transport: Send + Sync {
    /// Perform a single `POST`.
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Release the underlying resources. Further `post` calls should fail
    /// with [`TransportError::Closed`].
    fn close(&self) {}
}

/// Builds fresh transport handles.
pub trait Connector: Send + Sync {
    fn connect(&self) -> Result<Arc<dyn Transport>, TransportError>;
}

// ============================================================================
// reqwest implementation
// ============================================================================

/// [`Transport`] backed by [`reqwest::blocking::Client`].
pub struct HttpTransport {
    client: Mutex<Option<Client>>,
}

impl HttpTransport {
    /// Create a transport with reqwest's default settings.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(None)
    }

    /// Create a transport whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::from_client(builder.build()?))
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self {
            client: Mutex::new(Some(client)),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl Transport for HttpTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        // The client is an Arc internally; clone it so the lock is not held
        // across the round trip.
        let client = self
            .client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(TransportError::Closed)?;

        let body =
            serde_json::to_vec(&request.body).map_err(|e| TransportError::Write(e.to_string()))?;

        let mut builder = client.post(request.url.clone()).body(body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(auth) = &request.auth {
            builder = builder.basic_auth(auth.username(), Some(auth.password()));
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(HttpResponse { status, body })
    }

    fn close(&self) {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// [`Connector`] producing [`HttpTransport`]s.
#[derive(Clone, Debug, Default)]
pub struct HttpConnector {
    timeout: Option<Duration>,
}

impl HttpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request timeout applied to every transport this connector builds.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Connector for HttpConnector {
    fn connect(&self) -> Result<Arc<dyn Transport>, TransportError> {
        Ok(Arc::new(HttpTransport::with_timeout(self.timeout)?))
    }
}
