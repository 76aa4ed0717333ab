use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
use crate::core::types::{AccountBalances, Market, OrderAck, OrderBook, Ticker, Trade, TradeSide};
use crate::exchanges::btcx::markets::BtcxMarkets;
use crate::exchanges::btcx::rest::BtcxRest;
use crate::exchanges::btcx::EXCHANGE_ID;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// BTCX connector composing the market data, trading, and account
/// sub-components behind the uniform contract.
pub struct BtcxConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone> BtcxConnector<R> {
    /// Assemble a connector around an already-built REST client.
    pub fn new_with_rest(rest: R) -> Self {
        let markets = Arc::new(BtcxMarkets::bootstrap());
        Self {
            market: MarketData::new(BtcxRest::new(rest.clone()), Arc::clone(&markets)),
            trading: Trading::new(BtcxRest::new(rest.clone()), Arc::clone(&markets)),
            account: Account::new(BtcxRest::new(rest)),
        }
    }
}

impl<R: RestClient> BtcxConnector<R> {
    /// Raw private trading history (undocumented schema, passthrough).
    pub async fn order_history(&self, params: &[(&str, &str)]) -> Result<Value, ExchangeError> {
        self.account.order_history(params).await
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for BtcxConnector<R> {
    fn markets(&self) -> Vec<Market> {
        self.market.markets()
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        self.market.fetch_order_book(symbol, limit).await
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError> {
        self.market.fetch_ticker(symbol).await
    }

    async fn fetch_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError> {
        self.market.fetch_trades(symbol, limit).await
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for BtcxConnector<R> {
    async fn create_order(
        &self,
        symbol: &str,
        side: TradeSide,
        amount: Decimal,
        price: Option<Decimal>,
    ) -> Result<OrderAck, ExchangeError> {
        self.trading.create_order(symbol, side, amount, price).await
    }

    async fn cancel_order(&self, order_id: &str) -> Result<(), ExchangeError> {
        self.trading.cancel_order(order_id).await
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for BtcxConnector<R> {
    async fn fetch_balance(&self) -> Result<AccountBalances, ExchangeError> {
        self.account.fetch_balance().await
    }
}

#[async_trait]
impl<R: RestClient> ExchangeConnector for BtcxConnector<R> {
    fn exchange_id(&self) -> &'static str {
        EXCHANGE_ID
    }
}
