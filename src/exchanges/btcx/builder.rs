use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::btcx::connector::BtcxConnector;
use crate::exchanges::btcx::signer::BtcxSigner;
use crate::exchanges::btcx::EXCHANGE_ID;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://btc-x.is/api/v1";

/// Documented rate limit is absent; 1500ms is the observed safe pace.
const MIN_REQUEST_INTERVAL_MS: u64 = 1500;

/// Create a BTCX connector.
///
/// A signer is attached only when the configuration carries credentials;
/// public-only usage needs none, and a private call without one fails
/// with a configuration error before any request is sent.
pub fn build_connector(config: ExchangeConfig) -> Result<BtcxConnector<ReqwestRest>, ExchangeError> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let rest_config = RestClientConfig::new(base_url, EXCHANGE_ID.to_string())
        .with_timeout(30)
        .with_min_request_interval(Duration::from_millis(MIN_REQUEST_INTERVAL_MS));

    let mut rest_builder = RestClientBuilder::new(rest_config);

    if config.has_credentials() {
        let signer = Arc::new(BtcxSigner::new(
            config.api_key().to_string(),
            config.secret_key().to_string(),
        ));
        rest_builder = rest_builder.with_signer(signer);
    }

    let rest = rest_builder.build()?;
    Ok(BtcxConnector::new_with_rest(rest))
}
