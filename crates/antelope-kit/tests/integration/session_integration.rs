//! Connection ownership across sessions.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use antelope_kit::*;
use mockito::{Mock, Server, ServerGuard};

use crate::init_tracing;

/// Wraps the real transport and counts what goes through it.
struct CountingTransport {
    inner: HttpTransport,
    posts: AtomicUsize,
    closes: AtomicUsize,
}

impl CountingTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: HttpTransport::new().unwrap(),
            posts: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        })
    }
}

impl Transport for CountingTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.posts.fetch_add(1, Ordering::SeqCst);
        self.inner.post(request)
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close();
    }
}

/// Counts connections the client creates on its own.
#[derive(Clone, Default)]
struct CountingConnector {
    connects: Arc<AtomicUsize>,
}

impl Connector for CountingConnector {
    fn connect(&self) -> Result<Arc<dyn Transport>, TransportError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        HttpConnector::new().connect()
    }
}

fn info_server(expected: usize) -> (ServerGuard, Mock) {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/v1/chain/get_info")
        .with_status(200)
        .with_body(r#"{"head_block_num": 1}"#)
        .expect(expected)
        .create();
    (server, mock)
}

#[test]
fn test_without_transport_each_call_connects() {
    init_tracing();
    let (server, mock) = info_server(2);
    let connector = CountingConnector::default();
    let net = Net::custom(server.url())
        .connector(connector.clone())
        .build()
        .unwrap();

    net.get_info().unwrap();
    net.get_info().unwrap();

    assert_eq!(connector.connects.load(Ordering::SeqCst), 2);
    mock.assert();
}

#[test]
fn test_caller_transport_is_used_without_connecting() {
    init_tracing();
    let (server, mock) = info_server(2);
    let transport = CountingTransport::new();
    let connector = CountingConnector::default();
    let net = Net::custom(server.url())
        .transport(transport.clone())
        .connector(connector.clone())
        .build()
        .unwrap();

    {
        let session = net.open().unwrap();
        session.get_info().unwrap();
        session.get_info().unwrap();
    }

    assert_eq!(transport.posts.load(Ordering::SeqCst), 2);
    assert_eq!(connector.connects.load(Ordering::SeqCst), 0);
    // The caller still owns it.
    assert_eq!(transport.closes.load(Ordering::SeqCst), 0);
    mock.assert();
}

#[test]
fn test_session_connects_once() {
    init_tracing();
    let (server, mock) = info_server(3);
    let connector = CountingConnector::default();
    let net = Net::custom(server.url())
        .connector(connector.clone())
        .build()
        .unwrap();

    let head = net
        .with_session(|net| {
            net.get_info()?;
            net.get_info()?;
            net.get_info()
        })
        .unwrap();

    assert_eq!(head["head_block_num"], 1);
    assert_eq!(connector.connects.load(Ordering::SeqCst), 1);
    mock.assert();
}

#[test]
fn test_call_after_session_is_use_after_close() {
    init_tracing();
    let (server, mock) = info_server(1);
    let net = Net::new(server.url()).unwrap();

    let session = net.open().unwrap();
    session.get_info().unwrap();
    session.close();

    let err = net.get_info().unwrap_err();
    assert!(matches!(err, Error::Rpc(RpcError::UseAfterClose)));
    assert!(net.is_closed());
    mock.assert();
}

#[test]
fn test_caller_transport_after_session_is_use_after_close() {
    init_tracing();
    let (server, mock) = info_server(0);
    let transport = CountingTransport::new();
    let net = Net::custom(server.url())
        .transport(transport.clone())
        .build()
        .unwrap();

    net.open().unwrap().close();
    // Closing the caller's transport as well must not trip anything up.
    transport.close();

    let err = net.get_info().unwrap_err();
    assert!(matches!(err, Error::Rpc(RpcError::UseAfterClose)));
    assert_eq!(transport.posts.load(Ordering::SeqCst), 0);
    mock.assert();
}
