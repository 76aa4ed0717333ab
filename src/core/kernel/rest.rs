use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::Signer;
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tracing::{instrument, trace};

/// REST client trait for making HTTP requests.
///
/// This is the only seam between connectors and the network: connectors
/// build requests in exchange-native terms and receive decoded JSON, while
/// implementations own connection handling, authentication hand-off, and
/// rate limiting. Test doubles implement it with canned payloads.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request.
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_params` - Query parameters as key-value pairs
    /// * `authenticated` - Whether to sign the request
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a POST request with a JSON body.
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError>;

    /// Make a signed request with custom method and raw body bytes.
    ///
    /// The configured signer may rewrite the body before sending, e.g. to
    /// fold a nonce into a form-encoded payload.
    async fn signed_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
        body: &[u8],
    ) -> Result<Value, ExchangeError>;
}

/// Configuration for the REST client.
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Exchange name for logging and error payloads.
    pub exchange_name: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Minimum gap between consecutive requests, when the exchange has a
    /// documented (or observed) request ceiling. `None` disables pacing.
    pub min_request_interval: Option<Duration>,
    /// User agent string to include in requests.
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 30,
            min_request_interval: None,
            user_agent: "crossex/0.1".to_string(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the minimum inter-request interval.
    pub fn with_min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = Some(interval);
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances.
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests.
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client.
    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
            last_request: Arc::new(Mutex::new(None)),
        })
    }
}

/// Implementation of `RestClient` using reqwest.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Create a new `ReqwestRest` instance with default configuration.
    pub fn new(
        base_url: String,
        exchange_name: String,
        signer: Option<Arc<dyn Signer>>,
    ) -> Result<Self, ExchangeError> {
        let config = RestClientConfig::new(base_url, exchange_name);
        let mut builder = RestClientBuilder::new(config);
        if let Some(signer) = signer {
            builder = builder.with_signer(signer);
        }
        builder.build()
    }

    /// Get the current timestamp in milliseconds.
    fn get_timestamp() -> Result<u64, ExchangeError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .map_err(|e| ExchangeError::Configuration(format!("System clock error: {}", e)))
    }

    /// Build the full URL for an endpoint.
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Create query string from parameters.
    fn create_query_string(params: &[(&str, &str)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Caller-supplied query parameters stay on the URL; signer-added ones
    /// follow them.
    fn merge_query_params(
        original: &[(&str, &str)],
        signed: Vec<(String, String)>,
    ) -> Vec<(String, String)> {
        original
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .chain(signed)
            .collect()
    }

    /// Wait out the configured minimum inter-request interval.
    async fn pace(&self) {
        let Some(interval) = self.config.min_request_interval else {
            return;
        };
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < interval {
                tokio::time::sleep(interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Handle the response and extract JSON.
    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Value, ExchangeError> {
        let status = response.status();
        let response_text = response.text().await?;

        trace!("Response body: {}", response_text);

        if status.is_success() {
            serde_json::from_str(&response_text).map_err(|e| {
                ExchangeError::MalformedResponse(format!("Failed to parse JSON response: {}", e))
            })
        } else {
            // Non-2xx replies carry whatever diagnostics the exchange chose
            // to send; keep them verbatim.
            let payload = serde_json::from_str(&response_text)
                .unwrap_or(Value::String(response_text));
            Err(ExchangeError::Exchange {
                exchange: self.config.exchange_name.clone(),
                payload: serde_json::json!({
                    "status": status.as_u16(),
                    "body": payload,
                }),
            })
        }
    }

    /// Make a request with the given parameters.
    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint))]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
        body: &[u8],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let url = self.build_url(endpoint);
        let mut request = self.client.request(method.clone(), &url);
        let mut final_body = body.to_vec();
        let mut content_type_set = false;

        if authenticated {
            // Fail fast rather than send an unsigned private request.
            let Some(signer) = &self.signer else {
                return Err(ExchangeError::Configuration(
                    "Authentication required but no credentials configured".to_string(),
                ));
            };

            let timestamp = Self::get_timestamp()?;
            let query_string = Self::create_query_string(query_params);
            let signed =
                signer.sign_request(method.as_str(), endpoint, &query_string, body, timestamp)?;

            for (key, value) in signed.headers {
                if key.eq_ignore_ascii_case("content-type") {
                    content_type_set = true;
                }
                request = request.header(&key, &value);
            }
            for (key, value) in Self::merge_query_params(query_params, signed.query_params) {
                request = request.query(&[(key, value)]);
            }
            if let Some(replacement) = signed.body {
                final_body = replacement;
            }
        } else {
            for (key, value) in query_params {
                request = request.query(&[(key, value)]);
            }
        }

        if !final_body.is_empty() {
            if !content_type_set {
                request = request.header("Content-Type", "application/json");
            }
            request = request.body(final_body);
        }

        self.pace().await;
        let response = request.send().await?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = query_params.len()))]
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        self.make_request(Method::GET, endpoint, query_params, &[], authenticated)
            .await
    }

    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let body_bytes = serde_json::to_vec(body).map_err(|e| {
            ExchangeError::Serialization(format!("Failed to serialize request body: {}", e))
        })?;

        self.make_request(Method::POST, endpoint, &[], &body_bytes, authenticated)
            .await
    }

    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint))]
    async fn signed_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
        body: &[u8],
    ) -> Result<Value, ExchangeError> {
        self.make_request(method, endpoint, query_params, body, true)
            .await
    }
}
