use std::sync::Arc;
use std::time::Duration;

use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use sha2::Sha512;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use exmo_api_client::auth::StaticCredentials;
use exmo_api_client::error::ExmoError;
use exmo_api_client::rest::{AuthenticatedClient, Transport};
use exmo_api_client::types::{OrderType, Params};
use exmo_api_client::Value;

const API_KEY: &str = "K-2585e13a2ed7dcf4aaf869e40a7a6507eda3cd2e";
const API_SECRET: &str = "S-e5ab0dd485c7b9c92ba8d4111bedc400138b443e";

fn build_transport(server: &MockServer) -> Arc<Transport> {
    let credentials = Arc::new(StaticCredentials::new(API_KEY, API_SECRET));
    let transport = Transport::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .retry_delay(Duration::ZERO)
        .build()
        .unwrap();
    Arc::new(transport)
}

fn build_client(server: &MockServer) -> AuthenticatedClient {
    AuthenticatedClient::new(build_transport(server)).unwrap()
}

fn expected_signature(body: &[u8]) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(API_SECRET.as_bytes()).unwrap();
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

fn header_str<'a>(request: &'a Request, name: &str) -> &'a str {
    request.headers.get(name).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn test_user_info_is_signed() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "uid": 10542,
        "server_date": 1_435_518_576,
        "balances": {"BTC": "0.5", "USD": "0"},
        "reserved": {"BTC": "0", "USD": "0"}
    });

    Mock::given(method("POST"))
        .and(path("/v1/user_info"))
        .and(header("Key", API_KEY))
        .and(header_exists("Sign"))
        .and(body_string_contains("nonce="))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let info = client.user_info().await.unwrap();
    assert_eq!(info["uid"], Value::Int(10542));
    assert_eq!(info["balances"]["BTC"], Value::Float(0.5));
    assert_eq!(info["balances"]["USD"], Value::Int(0));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(header_str(request, "Sign"), expected_signature(&request.body));
}

#[tokio::test]
async fn test_order_create_body_and_signature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/order_create"))
        .and(body_string_contains("pair=USD_RUB&quantity=1.0&price=57.0&type=buy&nonce="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": true,
            "error": "",
            "order_id": 123456
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let created = client
        .order_create("USD_RUB", Decimal::new(10, 1), Decimal::new(570, 1), "buy")
        .await
        .unwrap();

    assert_eq!(created["result"], Value::Bool(true));
    assert_eq!(created["order_id"], Value::Int(123456));
    assert_eq!(created["error"].as_str(), Some(""));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let body = std::str::from_utf8(&request.body).unwrap();
    let nonce = body.rsplit_once("nonce=").unwrap().1;
    assert!(nonce.parse::<u64>().is_ok(), "nonce must be the last field");
    assert_eq!(header_str(request, "Sign"), expected_signature(&request.body));
}

#[tokio::test]
async fn test_order_create_accepts_enum() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/order_create"))
        .and(body_string_contains("type=market_sell_total"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"result": true, "order_id": 7})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let created = client
        .order_create("BTC_USD", Decimal::ONE, Decimal::new(57000, 0), OrderType::MarketSellTotal)
        .await
        .unwrap();
    assert_eq!(created["order_id"], Value::Int(7));
}

#[tokio::test]
async fn test_invalid_order_type_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .order_create("BTC_USD", Decimal::ONE, Decimal::ONE, "invalid")
        .await
        .unwrap_err();

    assert!(matches!(err, ExmoError::Config(_)));
    assert!(err.to_string().contains("invalid"));
}

#[tokio::test]
async fn test_insufficient_funds_is_terminal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/order_create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": false,
            "error": "Error 50054: Insufficient funds"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .order_create("USD_RUB", Decimal::ONE, Decimal::new(57, 0), "buy")
        .await
        .unwrap_err();

    match &err {
        ExmoError::Api(api) => {
            assert_eq!(api.message(), "Error 50054: Insufficient funds");
            assert!(api.is_insufficient_funds());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "Error 50054: Insufficient funds");
}

#[tokio::test]
async fn test_order_cancel_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/order_cancel"))
        .and(body_string_contains("order_id=0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": false,
            "error": "Error 50173: Order was not found '#0'"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.order_cancel(0).await.unwrap_err();
    assert!(err.api_error().unwrap().is_order_not_found());
}

#[tokio::test]
async fn test_user_trades_and_cancelled_orders_cap_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/user_trades"))
        .and(body_string_contains("pair=BTC_USD&offset=0&limit=10000&nonce="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"BTC_USD": []})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/user_cancelled_orders"))
        .and(body_string_contains("offset=100&limit=10000&nonce="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);

    let trades = client.user_trades("btc_usd", 0, Some(50_000)).await.unwrap();
    assert_eq!(trades["BTC_USD"].as_array().map(Vec::len), Some(0));

    let cancelled = client.user_cancelled_orders(100, Some(20_000)).await.unwrap();
    assert_eq!(cancelled, Value::Array(vec![]));
}

#[tokio::test]
async fn test_user_lists_default_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/user_trades"))
        .and(body_string_contains("pair=BTC_USD&offset=0&limit=100&nonce="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"BTC_USD": []})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/user_cancelled_orders"))
        .and(body_string_contains("offset=0&limit=100&nonce="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    client.user_trades("BTC_USD", 0, None).await.unwrap();
    client.user_cancelled_orders(0, None).await.unwrap();
}

#[tokio::test]
async fn test_required_amount() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/required_amount"))
        .and(body_string_contains("pair=BTC_USD&quantity=1&nonce="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "quantity": "1",
            "amount": "57000.25",
            "avg_price": "57000.25"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let amount = client.required_amount("BTC_USD", Decimal::ONE).await.unwrap();
    assert!(amount["avg_price"].as_f64().unwrap() > 0.0);
    assert_eq!(amount["quantity"], Value::Int(1));
}

#[tokio::test]
async fn test_withdraw_crypt_and_txid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/withdraw_crypt"))
        .and(body_string_contains(
            "amount=0.5&currency=BTC&address=1Jvu3g8DAe69jT2yQb9vfEvchvFJuQdABj&nonce=",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": true,
            "error": "",
            "task_id": "467756"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/withdraw_get_txid"))
        .and(body_string_contains("task_id=467756"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": true,
            "error": "",
            "status": true,
            "txid": "ec46f784ad976fd7f7539089d1a129fe46b6b5cc5aa8d3f5e9a94df4e3e3e6f0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let withdrawal = client
        .withdraw_crypt(Decimal::new(5, 1), "BTC", "1Jvu3g8DAe69jT2yQb9vfEvchvFJuQdABj")
        .await
        .unwrap();
    let task_id = withdrawal["task_id"].as_i64().unwrap();
    assert_eq!(task_id, 467756);

    let txid = client.withdraw_get_txid(task_id as u64).await.unwrap();
    assert_eq!(txid["status"], Value::Bool(true));
    assert!(txid["txid"].as_str().is_some());
}

#[tokio::test]
async fn test_remaining_account_endpoints() {
    let server = MockServer::start().await;

    for endpoint in ["user_open_orders", "deposit_address", "order_trades"] {
        Mock::given(method("POST"))
            .and(path(format!("/v1/{endpoint}")))
            .and(header_exists("Sign"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = build_client(&server);
    assert_eq!(client.user_open_orders().await.unwrap(), Value::Object(Default::default()));
    assert!(client.deposit_address().await.unwrap().as_object().is_some());
    assert!(client.order_trades(12345).await.unwrap().as_object().is_some());
}

#[tokio::test]
async fn test_public_endpoints_through_authenticated_client_are_signed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/ticker"))
        .and(header("Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    client.public().ticker().await.unwrap();
}

#[tokio::test]
async fn test_get_request_signs_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/user_info"))
        .and(query_param("limit", "5"))
        .and(header_exists("Sign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"uid": "1"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = build_transport(&server);
    let info = transport
        .request("GET", "user_info", Params::new().with("limit", 5))
        .await
        .unwrap();
    assert_eq!(info["uid"], Value::Int(1));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let query = request.url.query().unwrap();
    assert!(query.starts_with("limit=5&nonce="));
    assert_eq!(header_str(request, "Sign"), expected_signature(query.as_bytes()));
}

#[tokio::test]
async fn test_invalid_method_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let transport = build_transport(&server);
    let err = transport
        .request("put", "user_info", Params::new())
        .await
        .unwrap_err();
    assert!(err.is_config());
}

#[tokio::test]
async fn test_extra_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/user_info"))
        .and(header("X-Client", "desk-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = Transport::builder()
        .base_url(server.uri())
        .header("X-Client", "desk-7")
        .credentials(Arc::new(StaticCredentials::new(API_KEY, API_SECRET)))
        .build()
        .unwrap();
    let client = AuthenticatedClient::new(Arc::new(transport)).unwrap();
    client.user_info().await.unwrap();
}
