use std::sync::Arc;

use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use exmo_api_client::Value;
use exmo_api_client::rest::{PublicClient, Transport};

fn build_public_client(server: &MockServer) -> PublicClient {
    let transport = Transport::builder()
        .base_url(server.uri())
        .retry_delay(std::time::Duration::ZERO)
        .build()
        .unwrap();
    PublicClient::from_transport(Arc::new(transport))
}

#[tokio::test]
async fn test_trades_joins_and_uppercases_pairs() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "BTC_USD": [{
            "trade_id": 3,
            "type": "sell",
            "price": "57000.5",
            "quantity": "0.01",
            "amount": "570.005",
            "date": 1_700_000_000
        }],
        "ETH_USD": []
    });

    Mock::given(method("POST"))
        .and(path("/v1/trades"))
        .and(body_string("pair=BTC_USD%2CETH_USD"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let trades = client.trades(["btc_usd", "eth_usd"]).await.unwrap();

    let trade = &trades["BTC_USD"][0];
    assert_eq!(trade["trade_id"], Value::Int(3));
    assert_eq!(trade["price"], Value::Float(57000.5));
    assert_eq!(trade["type"].as_str(), Some("sell"));
    assert_eq!(trades["ETH_USD"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_public_requests_are_unsigned() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/ticker"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"BTC_USD": {"last_trade": "57000"}})),
        )
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let ticker = client.ticker().await.unwrap();
    assert_eq!(ticker["BTC_USD"]["last_trade"], Value::Int(57000));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("Key").is_none());
    assert!(requests[0].headers.get("Sign").is_none());
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_order_book_limit_is_capped() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "BTC_USD": {
            "ask_quantity": "3",
            "ask_amount": "500",
            "ask_top": "100",
            "bid_quantity": "1",
            "bid_amount": "99",
            "bid_top": "99",
            "ask": [["100", "1", "100"]],
            "bid": [["99", "1", "99"]]
        }
    });

    Mock::given(method("POST"))
        .and(path("/v1/order_book"))
        .and(body_string("pair=BTC_USD&limit=1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let book = client.order_book("btc_usd", Some(5000)).await.unwrap();

    assert_eq!(book["BTC_USD"]["ask_top"], Value::Int(100));
    assert_eq!(book["BTC_USD"]["bid"][0][0], Value::Int(99));
}

#[tokio::test]
async fn test_order_book_default_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/order_book"))
        .and(body_string("pair=BTC_USD&limit=100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"BTC_USD": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    client.order_book("BTC_USD", None).await.unwrap();
}

#[tokio::test]
async fn test_response_keys_keep_server_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/ticker"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"USD_RUB": {"last_trade": "90"}, "BTC_USD": {"last_trade": "57000"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let ticker = client.ticker().await.unwrap();
    let pairs: Vec<&str> = ticker.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(pairs, ["USD_RUB", "BTC_USD"]);
}

#[tokio::test]
async fn test_pair_settings_and_currency() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/pair_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "BTC_USD": {"min_quantity": "0.0001", "max_quantity": "1000"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/currency"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!(["BTC", "USD", "RUB"])),
        )
        .mount(&server)
        .await;

    let client = build_public_client(&server);

    let settings = client.pair_settings().await.unwrap();
    assert_eq!(settings["BTC_USD"]["min_quantity"], Value::Float(0.0001));
    assert_eq!(settings["BTC_USD"]["max_quantity"], Value::Int(1000));

    let currencies = client.currency().await.unwrap();
    let codes: Vec<&str> = currencies
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(codes, ["BTC", "USD", "RUB"]);
}

#[tokio::test]
async fn test_empty_pairs_rejected_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.trades("").await.unwrap_err();
    assert!(err.is_config());
}

#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/currency"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["BTC"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    assert!(client.ping().await);
}

#[tokio::test]
async fn test_ping_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/currency"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    assert!(!client.ping().await);
}

#[tokio::test]
async fn test_ping_unreachable() {
    let transport = Transport::builder()
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();
    let client = PublicClient::from_transport(Arc::new(transport));
    assert!(!client.ping().await);
}
