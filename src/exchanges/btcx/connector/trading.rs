use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::OrderPlacer;
use crate::core::types::{OrderAck, TradeSide};
use crate::exchanges::btcx::conversions;
use crate::exchanges::btcx::markets::BtcxMarkets;
use crate::exchanges::btcx::rest::BtcxRest;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Order placement and cancellation for BTCX.
pub struct Trading<R: RestClient> {
    rest: BtcxRest<R>,
    markets: Arc<BtcxMarkets>,
}

impl<R: RestClient> Trading<R> {
    pub fn new(rest: BtcxRest<R>, markets: Arc<BtcxMarkets>) -> Self {
        Self { rest, markets }
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for Trading<R> {
    async fn create_order(
        &self,
        symbol: &str,
        side: TradeSide,
        amount: Decimal,
        price: Option<Decimal>,
    ) -> Result<OrderAck, ExchangeError> {
        let market = self.markets.resolve(symbol)?;

        // BTCX has no market orders.
        let Some(price) = price else {
            return Err(ExchangeError::InvalidParameters(
                "btcx supports limit orders only; a price is required".to_string(),
            ));
        };

        let side = match side {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        };

        let raw = self
            .rest
            .place_order(&market.id, side, &amount.to_string(), &price.to_string())
            .await?;
        conversions::convert_order_ack(&raw)
    }

    async fn cancel_order(&self, order_id: &str) -> Result<(), ExchangeError> {
        // The acknowledgement has no stable schema; the envelope check has
        // already rejected failures.
        self.rest.cancel(order_id).await?;
        Ok(())
    }
}
