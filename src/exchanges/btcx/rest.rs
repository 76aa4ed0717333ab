use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::btcx::endpoints::{PrivateMethod, PublicEndpoint, PRIVATE_ENDPOINT};
use crate::exchanges::btcx::EXCHANGE_ID;
use reqwest::Method;
use serde_json::Value;

/// Thin typed wrapper around `RestClient` for the BTCX API.
///
/// This is the dispatcher: it expands endpoint templates, serializes
/// private bodies, and applies the single failure-classification point —
/// a response carrying an `error` key fails before any normalizer runs.
/// Sub-kinds of exchange errors are not distinguished; the payload does
/// not make them explicit.
pub struct BtcxRest<R: RestClient> {
    client: R,
}

impl<R: RestClient> BtcxRest<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    /// Error-envelope check on an otherwise-successful response.
    fn checked(value: Value) -> Result<Value, ExchangeError> {
        if value.get("error").is_some() {
            return Err(ExchangeError::exchange(EXCHANGE_ID, value));
        }
        Ok(value)
    }

    /// `GET depth/{id}/{limit}`
    pub async fn depth(&self, market_id: &str, limit: u32) -> Result<Value, ExchangeError> {
        let limit = limit.to_string();
        let path = PublicEndpoint::Depth.path(&[("id", market_id), ("limit", &limit)])?;
        Self::checked(self.client.get(&path, &[], false).await?)
    }

    /// `GET ticker/{id}`
    pub async fn ticker(&self, market_id: &str) -> Result<Value, ExchangeError> {
        let path = PublicEndpoint::Ticker.path(&[("id", market_id)])?;
        Self::checked(self.client.get(&path, &[], false).await?)
    }

    /// `GET trade/{id}/{limit}`
    pub async fn trades(&self, market_id: &str, limit: u32) -> Result<Value, ExchangeError> {
        let limit = limit.to_string();
        let path = PublicEndpoint::Trades.path(&[("id", market_id), ("limit", &limit)])?;
        Self::checked(self.client.get(&path, &[], false).await?)
    }

    /// POST a private wire method through the signed endpoint.
    ///
    /// The body leaves here as `Method=<WIRE>&params...`; the signer
    /// appends the nonce and signature before anything is sent.
    pub async fn private_post(
        &self,
        method: PrivateMethod,
        params: &[(&str, &str)],
    ) -> Result<Value, ExchangeError> {
        let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        pairs.push(("Method", method.wire_name()));
        pairs.extend_from_slice(params);

        let body = serde_urlencoded::to_string(&pairs).map_err(|e| {
            ExchangeError::Serialization(format!("Failed to encode private request body: {}", e))
        })?;

        let value = self
            .client
            .signed_request(Method::POST, PRIVATE_ENDPOINT, &[], body.as_bytes())
            .await?;
        Self::checked(value)
    }

    /// `POST balance`
    pub async fn balance(&self) -> Result<Value, ExchangeError> {
        self.private_post(PrivateMethod::Balance, &[]).await
    }

    /// `POST trade` — place an order.
    pub async fn place_order(
        &self,
        market_id: &str,
        side: &str,
        amount: &str,
        price: &str,
    ) -> Result<Value, ExchangeError> {
        self.private_post(
            PrivateMethod::Trade,
            &[
                ("type", side),
                ("market", market_id),
                ("amount", amount),
                ("price", price),
            ],
        )
        .await
    }

    /// `POST cancel`
    pub async fn cancel(&self, order_id: &str) -> Result<Value, ExchangeError> {
        self.private_post(PrivateMethod::Cancel, &[("order", order_id)])
            .await
    }

    /// `POST history` — raw passthrough; BTCX does not document a stable
    /// schema for this response.
    pub async fn history(&self, params: &[(&str, &str)]) -> Result<Value, ExchangeError> {
        self.private_post(PrivateMethod::History, params).await
    }
}
