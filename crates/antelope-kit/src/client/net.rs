//! The main client type and its builder.

use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use reqwest::header::{HeaderName, HeaderValue};

use crate::error::{Error, RpcError};
use crate::transport::{BasicAuth, Connector, HttpConnector, Transport};
use crate::types::Network;

use super::rpc::RpcClient;
use super::session::OpenError;

/// Client for the chain API of an Antelope node.
///
/// Calls are synchronous: each one blocks the current thread until the node
/// answers or the transport fails. Without a caller-supplied transport every
/// call gets a fresh connection that is closed right after; [`Net::open`]
/// binds calls to a single connection instead.
///
/// # Example
///
/// ```rust,no_run
/// use antelope_kit::*;
///
/// # fn main() -> Result<(), Error> {
/// let net = Net::builder(Network::Jungle4Testnet).build()?;
/// let info = net.get_info()?;
/// println!("head block: {}", info["head_block_num"]);
/// # Ok(())
/// # }
/// ```
pub struct Net {
    rpc: RpcClient,
    network: Option<Network>,
}

impl Net {
    /// Create a builder for a network preset.
    pub fn builder(network: Network) -> NetBuilder {
        NetBuilder::new(network.default_host(), Some(network))
    }

    /// Create a builder for an arbitrary host.
    pub fn custom(host: impl Into<String>) -> NetBuilder {
        NetBuilder::new(host, None)
    }

    /// Create a client for `host` with default settings.
    pub fn new(host: impl Into<String>) -> Result<Net, Error> {
        Net::custom(host).build()
    }

    /// Create a configured client from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `ANTELOPE_NETWORK` (optional): a preset name such as `"wax_mainnet"`,
    ///   or a host URL. Defaults to `"local"`.
    /// - `ANTELOPE_RPC_USER` / `ANTELOPE_RPC_PASSWORD` (optional): basic auth
    ///   credentials. Both or neither must be set.
    /// - `ANTELOPE_RPC_TIMEOUT_SECS` (optional): per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if only one of the credentials is set, if the
    /// timeout is not an integer, or if the host is invalid.
    pub fn from_env() -> Result<Net, Error> {
        Net::from_env_vars(|name| std::env::var(name).ok())
    }

    fn from_env_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Net, Error> {
        let mut builder = match lookup("ANTELOPE_NETWORK") {
            None => Net::builder(Network::default()),
            Some(value) => match value.parse::<Network>() {
                Ok(network) => Net::builder(network),
                Err(_) => Net::custom(value),
            },
        };

        match (lookup("ANTELOPE_RPC_USER"), lookup("ANTELOPE_RPC_PASSWORD")) {
            (Some(user), Some(password)) => {
                builder = builder.basic_auth(user, password);
            }
            (Some(_), None) => {
                return Err(Error::Config(
                    "ANTELOPE_RPC_USER is set but ANTELOPE_RPC_PASSWORD is missing".into(),
                ));
            }
            (None, Some(_)) => {
                return Err(Error::Config(
                    "ANTELOPE_RPC_PASSWORD is set but ANTELOPE_RPC_USER is missing".into(),
                ));
            }
            (None, None) => {}
        }

        if let Some(secs) = lookup("ANTELOPE_RPC_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "ANTELOPE_RPC_TIMEOUT_SECS must be a whole number of seconds, got '{secs}'"
                ))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Get the underlying RPC client.
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// The host every endpoint is joined against.
    pub fn host(&self) -> &Url {
        self.rpc.host()
    }

    /// The preset this client was built from, `None` for a custom host.
    pub fn network(&self) -> Option<Network> {
        self.network
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Bind every call to one connection until the returned [`Session`] is
    /// dropped or [`closed`](Session::close).
    ///
    /// A connection created for the session is closed when it ends; a
    /// caller-supplied transport is reused and left open. Either way the
    /// client is finished afterwards: further calls fail with
    /// [`RpcError::UseAfterClose`].
    ///
    /// ```rust,no_run
    /// # use antelope_kit::*;
    /// # fn example() -> Result<(), Error> {
    /// let net = Net::builder(Network::Local).build()?;
    /// {
    ///     let session = net.open()?;
    ///     session.get_info()?;
    ///     session.get_account("eosio")?;
    /// }
    /// assert!(net.get_info().is_err());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if a session is already open, and
    /// [`RpcError::UseAfterClose`] if an earlier session already ended.
    pub fn open(&self) -> Result<Session<'_>, Error> {
        self.rpc.open().map_err(|e| match e {
            OpenError::AlreadyOpen => Error::Config("a session is already open on this client".into()),
            OpenError::Released => Error::Rpc(RpcError::UseAfterClose),
        })?;
        tracing::debug!(host = %self.host(), "session opened");
        Ok(Session { net: self })
    }

    /// Run `f` inside a session, releasing it on every exit path.
    pub fn with_session<T>(&self, f: impl FnOnce(&Net) -> Result<T, Error>) -> Result<T, Error> {
        let session = self.open()?;
        f(&session)
    }

    /// Returns true once a session on this client has ended.
    pub fn is_closed(&self) -> bool {
        self.rpc.is_released()
    }

    /// Returns true while a session is open.
    pub fn in_session(&self) -> bool {
        self.rpc.in_session()
    }
}

impl std::fmt::Debug for Net {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Net")
            .field("rpc", &self.rpc)
            .field("network", &self.network)
            .finish()
    }
}

/// A scoped connection on a [`Net`]. Derefs to the client.
#[must_use = "the session ends as soon as it is dropped"]
pub struct Session<'a> {
    net: &'a Net,
}

impl Session<'_> {
    /// End the session now.
    pub fn close(self) {}
}

impl Deref for Session<'_> {
    type Target = Net;

    fn deref(&self) -> &Net {
        self.net
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        tracing::debug!(host = %self.net.host(), "session closed");
        self.net.rpc.release();
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("net", self.net).finish()
    }
}

/// Builder for creating a [`Net`] client.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use antelope_kit::*;
///
/// # fn example() -> Result<(), Error> {
/// let net = Net::builder(Network::WaxMainnet)
///     .host("https://wax.example.com")
///     .header("x-api-key", "secret")
///     .basic_auth("user", "password")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct NetBuilder {
    host: String,
    network: Option<Network>,
    headers: BTreeMap<String, String>,
    auth: Option<BasicAuth>,
    transport: Option<Arc<dyn Transport>>,
    connector: Option<Arc<dyn Connector>>,
    timeout: Option<Duration>,
}

impl NetBuilder {
    fn new(host: impl Into<String>, network: Option<Network>) -> Self {
        Self {
            host: host.into(),
            network,
            headers: BTreeMap::new(),
            auth: None,
            transport: None,
            connector: None,
            timeout: None,
        }
    }

    /// Replace the preset's default host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Add a header sent with every request. Names are case-insensitive
    /// and override the defaults, `user-agent` included.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add several headers at once.
    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Authenticate every request with HTTP basic auth.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(BasicAuth::new(username, password));
        self
    }

    /// Use a caller-owned transport for every call. It is never closed by
    /// the client.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom factory for the connections the client creates itself.
    pub fn connector(mut self, connector: impl Connector + 'static) -> Self {
        self.connector = Some(Arc::new(connector));
        self
    }

    /// Per-request timeout for connections created by the default
    /// connector. Ignored when a custom transport or connector is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHost`] unless the host is an absolute `http` or
    /// `https` URL, and [`Error::Config`] for a header that cannot be sent.
    pub fn build(self) -> Result<Net, Error> {
        let host = parse_host(&self.host)?;
        check_headers(&self.headers)?;

        let connector: Arc<dyn Connector> = match (self.connector, self.timeout) {
            (Some(connector), _) => connector,
            (None, Some(timeout)) => Arc::new(HttpConnector::with_timeout(timeout)),
            (None, None) => Arc::new(HttpConnector::new()),
        };

        tracing::debug!(
            host = %host,
            network = ?self.network,
            external_transport = self.transport.is_some(),
            "client configured"
        );

        Ok(Net {
            rpc: RpcClient::new(host, self.headers, self.auth, connector, self.transport),
            network: self.network,
        })
    }
}

impl std::fmt::Debug for NetBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetBuilder")
            .field("host", &self.host)
            .field("network", &self.network)
            .field("headers", &self.headers)
            .field("auth", &self.auth)
            .field("external_transport", &self.transport.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_host(host: &str) -> Result<Url, Error> {
    let invalid = |reason: String| Error::InvalidHost {
        host: host.to_string(),
        reason,
    };

    let url = Url::parse(host).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme must be http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host name".to_string()));
    }
    Ok(url)
}

fn check_headers(headers: &BTreeMap<String, String>) -> Result<(), Error> {
    for (name, value) in headers {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Config(format!("invalid header name '{name}': {e}")))?;
        HeaderValue::from_str(value)
            .map_err(|e| Error::Config(format!("invalid value for header '{name}': {e}")))?;
    }
    Ok(())
}
