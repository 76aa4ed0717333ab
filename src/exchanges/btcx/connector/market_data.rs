use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::MarketDataSource;
use crate::core::types::{Market, OrderBook, Ticker, Trade};
use crate::exchanges::btcx::conversions;
use crate::exchanges::btcx::markets::BtcxMarkets;
use crate::exchanges::btcx::rest::BtcxRest;
use crate::exchanges::btcx::DEFAULT_PAGE_LIMIT;
use async_trait::async_trait;
use std::sync::Arc;

/// Market data operations for BTCX.
pub struct MarketData<R: RestClient> {
    rest: BtcxRest<R>,
    markets: Arc<BtcxMarkets>,
}

impl<R: RestClient> MarketData<R> {
    pub fn new(rest: BtcxRest<R>, markets: Arc<BtcxMarkets>) -> Self {
        Self { rest, markets }
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for MarketData<R> {
    fn markets(&self) -> Vec<Market> {
        self.markets.all()
    }

    async fn fetch_order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        let market = self.markets.resolve(symbol)?;
        let raw = self
            .rest
            .depth(&market.id, limit.unwrap_or(DEFAULT_PAGE_LIMIT))
            .await?;
        conversions::convert_order_book(&raw, market)
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker, ExchangeError> {
        let market = self.markets.resolve(symbol)?;
        let raw = self.rest.ticker(&market.id).await?;
        conversions::convert_ticker(&raw, market)
    }

    async fn fetch_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, ExchangeError> {
        let market = self.markets.resolve(symbol)?;
        let raw = self
            .rest
            .trades(&market.id, limit.unwrap_or(DEFAULT_PAGE_LIMIT))
            .await?;
        conversions::convert_trades(&raw, market)
    }
}
