use async_trait::async_trait;
use crossex::core::errors::ExchangeError;
use crossex::core::kernel::RestClient;
use crossex::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
use crossex::core::types::TradeSide;
use crossex::exchanges::btcx::BtcxConnector;
use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// A recorded request as the stub transport saw it.
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    endpoint: String,
    body: String,
    authenticated: bool,
}

#[derive(Default)]
struct StubInner {
    responses: Mutex<HashMap<String, Value>>,
    calls: Mutex<Vec<Recorded>>,
}

/// Stub transport: canned JSON per endpoint, every call recorded.
#[derive(Clone, Default)]
struct StubRest {
    inner: Arc<StubInner>,
}

impl StubRest {
    fn with_response(self, endpoint: &str, response: Value) -> Self {
        self.inner
            .responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), response);
        self
    }

    fn calls(&self) -> Vec<Recorded> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn respond(&self, endpoint: &str) -> Result<Value, ExchangeError> {
        self.inner
            .responses
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .ok_or_else(|| {
                ExchangeError::MalformedResponse(format!("stub has no response for {endpoint}"))
            })
    }

    fn record(&self, method: &str, endpoint: &str, body: &str, authenticated: bool) {
        self.inner.calls.lock().unwrap().push(Recorded {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            body: body.to_string(),
            authenticated,
        });
    }
}

#[async_trait]
impl RestClient for StubRest {
    async fn get(
        &self,
        endpoint: &str,
        _query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.record("GET", endpoint, "", authenticated);
        self.respond(endpoint)
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.record("POST", endpoint, &body.to_string(), authenticated);
        self.respond(endpoint)
    }

    async fn signed_request(
        &self,
        method: Method,
        endpoint: &str,
        _query_params: &[(&str, &str)],
        body: &[u8],
    ) -> Result<Value, ExchangeError> {
        self.record(
            method.as_str(),
            endpoint,
            std::str::from_utf8(body).unwrap(),
            true,
        );
        self.respond(endpoint)
    }
}

fn connector(stub: &StubRest) -> BtcxConnector<StubRest> {
    BtcxConnector::new_with_rest(stub.clone())
}

fn body_params(body: &str) -> HashMap<String, String> {
    serde_urlencoded::from_str(body).unwrap()
}

#[tokio::test]
async fn fetch_ticker_normalizes_the_btcx_payload() {
    let stub = StubRest::default().with_response(
        "/ticker/btc/usd",
        json!({
            "time": 1000,
            "high": "500",
            "low": "480",
            "sell": "490",
            "buy": "495",
            "last": "492",
            "volume": "10"
        }),
    );

    let ticker = connector(&stub).fetch_ticker("BTC/USD").await.unwrap();

    assert_eq!(ticker.symbol.to_string(), "BTC/USD");
    assert_eq!(ticker.timestamp, Some(1_000_000));
    assert_eq!(ticker.high, Some(Decimal::from(500)));
    assert_eq!(ticker.low, Some(Decimal::from(480)));
    assert_eq!(ticker.bid, Some(Decimal::from(490)));
    assert_eq!(ticker.ask, Some(Decimal::from(495)));
    assert_eq!(ticker.last, Some(Decimal::from(492)));
    assert_eq!(ticker.quote_volume, Some(Decimal::from(10)));
    assert_eq!(ticker.vwap, None);
    assert_eq!(ticker.open, None);
    assert_eq!(ticker.close, None);
    assert_eq!(ticker.base_volume, None);

    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "GET");
    assert_eq!(calls[0].endpoint, "/ticker/btc/usd");
    assert!(!calls[0].authenticated);
}

#[tokio::test]
async fn fetch_order_book_uses_the_depth_template_and_default_limit() {
    let stub = StubRest::default().with_response(
        "/depth/btc/usd/1000",
        json!({
            "bids": [
                {"price": "500", "amount": "1"},
                {"price": "499", "amount": "2"}
            ],
            "asks": [
                {"price": "501", "amount": "3"}
            ]
        }),
    );

    let book = connector(&stub)
        .fetch_order_book("BTC/USD", None)
        .await
        .unwrap();

    assert_eq!(book.bids.len(), 2);
    assert_eq!(book.asks.len(), 1);
    assert_eq!(book.bids[0].price, Decimal::from(500));
    assert_eq!(book.asks[0].amount, Decimal::from(3));
    assert_eq!(stub.calls()[0].endpoint, "/depth/btc/usd/1000");
}

#[tokio::test]
async fn fetch_order_book_honors_an_explicit_limit() {
    let stub = StubRest::default()
        .with_response("/depth/btc/eur/25", json!({"bids": [], "asks": []}));

    let book = connector(&stub)
        .fetch_order_book("BTC/EUR", Some(25))
        .await
        .unwrap();

    assert!(book.bids.is_empty());
    assert_eq!(stub.calls()[0].endpoint, "/depth/btc/eur/25");
}

#[tokio::test]
async fn fetch_trades_normalizes_sides_and_timestamps() {
    let stub = StubRest::default().with_response(
        "/trade/btc/usd/1000",
        json!([
            {"id": 1, "date": 1000, "type": "ask", "price": "490", "amount": "1"},
            {"id": 2, "date": 1001, "type": "bid", "price": "491", "amount": "0.5"}
        ]),
    );

    let trades = connector(&stub).fetch_trades("BTC/USD", None).await.unwrap();

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].id, "1");
    assert_eq!(trades[0].side, TradeSide::Sell);
    assert_eq!(trades[0].timestamp, 1_000_000);
    assert_eq!(trades[1].side, TradeSide::Buy);
    assert_eq!(trades[1].amount, Decimal::from_str("0.5").unwrap());
}

#[tokio::test]
async fn unknown_symbol_fails_without_touching_the_wire() {
    let stub = StubRest::default();
    let err = connector(&stub).fetch_ticker("ETH/USD").await.unwrap_err();

    assert!(matches!(err, ExchangeError::MarketNotFound(_)));
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn error_envelope_fails_public_calls_before_normalization() {
    let stub = StubRest::default().with_response(
        "/ticker/btc/usd",
        json!({"error": "market suspended"}),
    );

    let err = connector(&stub).fetch_ticker("BTC/USD").await.unwrap_err();
    match err {
        ExchangeError::Exchange { exchange, payload } => {
            assert_eq!(exchange, "btcx");
            assert_eq!(payload["error"], "market suspended");
        }
        other => panic!("expected exchange error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_envelope_fails_private_calls_too() {
    let stub = StubRest::default()
        .with_response("/private", json!({"error": "invalid signature"}));

    let err = connector(&stub).fetch_balance().await.unwrap_err();
    assert!(matches!(err, ExchangeError::Exchange { .. }));
}

#[tokio::test]
async fn fetch_balance_maps_currencies_and_keeps_the_raw_payload() {
    let raw = json!({"btc": "0.5", "usd": 1200, "eur": "0"});
    let stub = StubRest::default().with_response("/private", raw.clone());

    let balances = connector(&stub).fetch_balance().await.unwrap();

    let btc = balances.get("BTC").unwrap();
    assert_eq!(btc.free, Decimal::from_str("0.5").unwrap());
    assert_eq!(btc.used, Decimal::ZERO);
    assert_eq!(btc.total, Decimal::from_str("0.5").unwrap());
    assert!(balances.balances.contains_key("USD"));
    assert!(balances.balances.contains_key("EUR"));
    assert_eq!(balances.raw, raw);

    let calls = stub.calls();
    assert_eq!(calls[0].endpoint, "/private");
    assert_eq!(body_params(&calls[0].body)["Method"], "BALANCE");
    assert!(calls[0].authenticated);
}

#[tokio::test]
async fn create_order_posts_the_trade_method_with_market_and_side() {
    let stub = StubRest::default()
        .with_response("/private", json!({"order": {"id": "o-17"}}));

    let ack = connector(&stub)
        .create_order(
            "BTC/USD",
            TradeSide::Sell,
            Decimal::from_str("1.5").unwrap(),
            Some(Decimal::from(500)),
        )
        .await
        .unwrap();

    assert_eq!(ack.id, "o-17");

    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].endpoint, "/private");

    let params = body_params(&calls[0].body);
    assert_eq!(params["Method"], "TRADE");
    assert_eq!(params["type"], "SELL");
    assert_eq!(params["market"], "btc/usd");
    assert_eq!(params["amount"], "1.5");
    assert_eq!(params["price"], "500");
}

#[tokio::test]
async fn create_order_without_price_is_rejected_locally() {
    let stub = StubRest::default();
    let err = connector(&stub)
        .create_order("BTC/USD", TradeSide::Buy, Decimal::ONE, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::InvalidParameters(_)));
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn cancel_order_posts_the_cancel_method() {
    let stub = StubRest::default().with_response("/private", json!({"result": true}));

    connector(&stub).cancel_order("o-17").await.unwrap();

    let params = body_params(&stub.calls()[0].body);
    assert_eq!(params["Method"], "CANCEL");
    assert_eq!(params["order"], "o-17");
}

#[tokio::test]
async fn order_history_passes_parameters_through() {
    let stub = StubRest::default().with_response("/private", json!([{"id": 1}]));

    let history = connector(&stub)
        .order_history(&[("market", "btc/usd")])
        .await
        .unwrap();

    assert!(history.is_array());
    let params = body_params(&stub.calls()[0].body);
    assert_eq!(params["Method"], "HISTORY");
    assert_eq!(params["market"], "btc/usd");
}

#[tokio::test]
async fn connector_satisfies_the_uniform_contract() {
    let stub = StubRest::default();
    let connector = connector(&stub);

    assert_eq!(connector.exchange_id(), "btcx");

    let markets = connector.markets();
    assert_eq!(markets.len(), 2);
    assert!(markets.iter().any(|m| m.symbol.to_string() == "BTC/USD"));
    assert!(markets.iter().any(|m| m.id == "btc/eur"));
}

#[tokio::test]
async fn normalizing_the_same_payload_twice_is_identical() {
    let payload = json!({
        "bids": [{"price": "500", "amount": "1"}],
        "asks": [{"price": "501", "amount": "2"}]
    });
    let stub = StubRest::default().with_response("/depth/btc/usd/1000", payload);
    let connector = connector(&stub);

    let first = connector.fetch_order_book("BTC/USD", None).await.unwrap();
    let second = connector.fetch_order_book("BTC/USD", None).await.unwrap();
    assert_eq!(first, second);
}
