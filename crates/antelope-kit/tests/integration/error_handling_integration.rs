//! Failure classification over HTTP.

use std::net::TcpListener;
use std::time::Duration;

use antelope_kit::*;
use mockito::Server;
use serde_json::json;

use crate::init_tracing;

// =============================================================================
// HTTP statuses
// =============================================================================

#[test]
fn test_rejected_statuses_are_connection_errors() {
    init_tracing();
    for status in [301, 400, 404, 502, 503] {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/v1/chain/get_info")
            .with_status(status)
            .with_body("nope")
            .create();

        let err = Net::new(server.url()).unwrap().get_info().unwrap_err();
        match err {
            Error::Rpc(rpc) => {
                assert!(rpc.is_connection_error(), "status {status}: {rpc:?}");
                assert_eq!(rpc.status(), Some(status as u16));
            }
            other => panic!("Expected Rpc error for {status}, got: {:?}", other),
        }
        mock.assert();
    }
}

#[test]
fn test_status_500_is_data() {
    init_tracing();
    let mut server = Server::new();
    let body = json!({
        "code": 500,
        "message": "Internal Service Error",
        "error": {"code": 3010001, "name": "name_type_exception", "what": "Invalid name", "details": []}
    });
    let mock = server
        .mock("POST", "/v1/chain/get_account")
        .with_status(500)
        .with_body(body.to_string())
        .create();

    let account = Net::new(server.url())
        .unwrap()
        .get_account("Invalid Name")
        .unwrap();

    assert_eq!(account, body);
    let node_error = NodeError::from_value(&account).unwrap();
    assert_eq!(node_error.error.name, "name_type_exception");
    mock.assert();
}

#[test]
fn test_non_json_body_is_invalid_response() {
    init_tracing();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/v1/chain/get_info")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create();

    let err = Net::new(server.url()).unwrap().get_info().unwrap_err();
    assert!(matches!(err, Error::Rpc(RpcError::InvalidResponse { .. })));
    mock.assert();
}

// =============================================================================
// Transport failures
// =============================================================================

#[test]
fn test_refused_connection_is_connection_error() {
    init_tracing();
    // Bind then drop to get a port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let net = Net::new(format!("http://127.0.0.1:{port}")).unwrap();
    let err = net.get_info().unwrap_err();

    match err {
        Error::Rpc(RpcError::Connection {
            url,
            response,
            source,
            ..
        }) => {
            assert_eq!(url, format!("http://127.0.0.1:{port}/v1/chain/get_info"));
            assert!(response.is_none());
            assert!(source.is_some());
        }
        other => panic!("Expected Connection error, got: {:?}", other),
    }
}

#[test]
fn test_timeout_is_connection_error() {
    init_tracing();
    // Accepts connections into the backlog but never answers.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let net = Net::custom(format!("http://{addr}"))
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = net.get_account("eosio").unwrap_err();

    match err {
        Error::Rpc(rpc) => {
            assert!(rpc.is_connection_error());
            assert_eq!(rpc.status(), None);
        }
        other => panic!("Expected Rpc error, got: {:?}", other),
    }
    drop(listener);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_invalid_host_fails_construction() {
    let err = Net::new("rpc://127.0.0.1:8888").unwrap_err();
    assert!(matches!(err, Error::InvalidHost { .. }));

    let err = Net::builder(Network::Local).host("127.0.0.1:8888").build().unwrap_err();
    assert!(matches!(err, Error::InvalidHost { .. }));
}

#[test]
fn test_unsendable_header_fails_build() {
    init_tracing();
    let mut server = Server::new();
    let mock = server.mock("POST", "/v1/chain/get_info").expect(0).create();

    let err = Net::custom(server.url())
        .header("x-api-key", "a\nb")
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    mock.assert();
}

#[test]
fn test_network_presets() {
    for name in ["eos_mainnet", "jungle4-testnet", "WAX_MAINNET", "local"] {
        let network: Network = name.parse().unwrap();
        let net = Net::builder(network).build().unwrap();
        assert!(matches!(net.host().scheme(), "http" | "https"));
    }

    let err = "bitcoin".parse::<Network>().unwrap_err();
    assert_eq!(err, ParseNetworkError("bitcoin".to_string()));
}
