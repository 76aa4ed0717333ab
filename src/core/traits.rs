use crate::core::{
    errors::ExchangeError,
    types::{AccountBalances, Market, OrderAck, OrderBook, Ticker, Trade, TradeSide},
};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Public market data operations every connector exposes.
///
/// `limit` arguments of `None` fall back to the exchange default depth.
#[async_trait]
pub trait MarketDataSource {
    /// All markets this connector knows, as loaded into its registry.
    fn markets(&self) -> Vec<Market>;

    /// Order book snapshot for a normalized `"BASE/QUOTE"` symbol.
    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, ExchangeError>;

    /// Ticker snapshot for a normalized symbol.
    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError>;

    /// Recent public trades for a normalized symbol.
    async fn fetch_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError>;
}

/// Order placement and cancellation.
///
/// Idempotence of these two operations is exchange-defined: retrying a
/// failed `create_order` may double-submit.
#[async_trait]
pub trait OrderPlacer {
    /// Place an order. `price` is required by exchanges without market
    /// order support; such connectors reject `None`.
    async fn create_order(
        &self,
        symbol: &str,
        side: TradeSide,
        amount: Decimal,
        price: Option<Decimal>,
    ) -> Result<OrderAck, ExchangeError>;

    /// Cancel an order by its exchange-assigned id.
    async fn cancel_order(&self, order_id: &str) -> Result<(), ExchangeError>;
}

/// Private account operations.
#[async_trait]
pub trait AccountInfo {
    /// Balances across all currencies the account holds.
    async fn fetch_balance(&self) -> Result<AccountBalances, ExchangeError>;
}

/// Composite contract a full exchange connector satisfies.
#[async_trait]
pub trait ExchangeConnector: MarketDataSource + OrderPlacer + AccountInfo {
    /// Stable lowercase identifier for this exchange, used in error
    /// payloads and logging.
    fn exchange_id(&self) -> &'static str;
}
