use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::AccountInfo;
use crate::core::types::AccountBalances;
use crate::exchanges::btcx::conversions;
use crate::exchanges::btcx::rest::BtcxRest;
use async_trait::async_trait;
use serde_json::Value;

/// Private account operations for BTCX.
pub struct Account<R: RestClient> {
    rest: BtcxRest<R>,
}

impl<R: RestClient> Account<R> {
    pub fn new(rest: BtcxRest<R>) -> Self {
        Self { rest }
    }

    /// Raw trading history, as the exchange returns it. The schema is
    /// undocumented, so no normalization is attempted.
    pub async fn order_history(&self, params: &[(&str, &str)]) -> Result<Value, ExchangeError> {
        self.rest.history(params).await
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for Account<R> {
    async fn fetch_balance(&self) -> Result<AccountBalances, ExchangeError> {
        let raw = self.rest.balance().await?;
        conversions::convert_balances(&raw)
    }
}
