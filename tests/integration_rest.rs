//! Integration tests for the REST client against a mock exchange.
//!
//! Every test spins up a `wiremock` server and points the client at it, so
//! no credentials or network access are needed.

mod common;

use std::time::Duration;

use common::{client_for, setup_mock_server, TEST_API_KEY, TEST_API_SECRET};
use fapi_trading::client::auth::Signer;
use fapi_trading::client::rest::{ORDER_PATH, PING_PATH};
use fapi_trading::validation::validate_order;
use fapi_trading::{ApiError, Config, Error, TradingClient};
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn order_response() -> serde_json::Value {
    serde_json::json!({
        "orderId": 4052321,
        "symbol": "BTCUSDT",
        "status": "NEW",
        "side": "BUY",
        "type": "LIMIT",
        "origQty": "0.010",
        "executedQty": "0",
        "avgPrice": "0.00",
        "cumQuote": "0.00000",
        "timeInForce": "GTC",
        "updateTime": 1700000000000u64
    })
}

/// Query string of the only request the server received
async fn single_query(server: &MockServer) -> String {
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    requests[0].url.query().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_ping_empty_object() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path(PING_PATH))
        .and(header("X-MBX-APIKEY", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, sink) = client_for(&server);
    assert!(assert_ok!(client.ping().await));

    // Public endpoint: nothing is signed
    let query = single_query(&server).await;
    assert!(!query.contains("signature"));
    assert!(!sink.lines("info").is_empty());
}

#[tokio::test]
async fn test_ping_other_body_is_false() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path(PING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    assert!(!assert_ok!(client.ping().await));
}

#[tokio::test]
async fn test_limit_order_payload_and_signature() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(ORDER_PATH))
        .and(header("X-MBX-APIKEY", TEST_API_KEY))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(query_param("symbol", "BTCUSDT"))
        .and(query_param("side", "BUY"))
        .and(query_param("type", "LIMIT"))
        .and(query_param("quantity", "0.01"))
        .and(query_param("price", "50000"))
        .and(query_param("timeInForce", "GTC"))
        .and(query_param("newOrderRespType", "RESULT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_response()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, sink) = client_for(&server);
    let params = assert_ok!(validate_order("btcusdt", "buy", "limit", "0.01", Some("50000")));
    let response = assert_ok!(client.submit_order(&params).await);

    // Returned verbatim
    assert_eq!(response, order_response());

    let query = single_query(&server).await;
    let (unsigned, signature) = query.rsplit_once("&signature=").expect("signature last");
    assert!(unsigned.contains("&timestamp="));
    let signer = Signer::new(TEST_API_SECRET).unwrap();
    assert_eq!(signer.digest(unsigned), signature);

    // The secret never leaves the client
    assert!(!query.contains(TEST_API_SECRET));

    let info = sink.lines("info");
    assert!(info.iter().any(|l| l.contains("Placing BUY LIMIT order")));
    assert!(info.iter().any(|l| l.contains("orderId=4052321")));
}

#[tokio::test]
async fn test_market_order_omits_price() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(ORDER_PATH))
        .and(query_param("type", "MARKET"))
        .and(query_param_is_missing("price"))
        .and(query_param_is_missing("timeInForce"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_response()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let params = assert_ok!(validate_order("BTCUSDT", "BUY", "MARKET", "0.01", Some("50000")));
    assert_ok!(client.submit_order(&params).await);
}

#[tokio::test]
async fn test_api_error_translated() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path(ORDER_PATH))
        .respond_with(
            ResponseTemplate::new(418)
                .set_body_json(serde_json::json!({"code": -2010, "msg": "insufficient balance"})),
        )
        .mount(&server)
        .await;

    let (client, sink) = client_for(&server);
    let params = validate_order("BTCUSDT", "BUY", "MARKET", "1", None).unwrap();
    let err = client.submit_order(&params).await.unwrap_err();

    assert!(err.is_api());
    assert!(!err.is_transport());
    assert_eq!(
        err.api_error(),
        Some(&ApiError::with_code(418, -2010, "insufficient balance"))
    );
    assert_eq!(sink.lines("error").len(), 1);
}

#[tokio::test]
async fn test_api_error_unparsable_body() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path(PING_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    match client.ping().await {
        Err(Error::Api(api)) => {
            assert_eq!(api.status, 503);
            assert_eq!(api.code, ApiError::UNKNOWN_CODE);
            assert_eq!(api.message, "Service Unavailable");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_success_with_garbage_body() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path(PING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let err = client.ping().await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path(PING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = Config::new(TEST_API_KEY, TEST_API_SECRET)
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let client = TradingClient::new(config).unwrap();

    let err = client.ping().await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.is_timeout());
    assert!(!err.is_api());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on the tcpmux port
    let config = Config::new(TEST_API_KEY, TEST_API_SECRET).with_base_url("http://127.0.0.1:1");
    let client = TradingClient::new(config).unwrap();

    let err = client.ping().await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path(PING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(ORDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_response()))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server);
    let client = std::sync::Arc::new(client);
    let params = validate_order("BTCUSDT", "BUY", "MARKET", "1", None).unwrap();

    let ping = {
        let client = client.clone();
        tokio::spawn(async move { client.ping().await })
    };
    let submit = {
        let client = client.clone();
        tokio::spawn(async move { client.submit_order(&params).await })
    };

    assert!(ping.await.unwrap().unwrap());
    assert_eq!(submit.await.unwrap().unwrap()["orderId"], 4052321);
}

#[tokio::test]
async fn test_malformed_base_url_is_config_error() {
    let config = Config::new(TEST_API_KEY, TEST_API_SECRET).with_base_url("not a url");
    let err = TradingClient::new(config).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(!err.is_transport());
}
