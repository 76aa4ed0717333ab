use thiserror::Error;

/// Unified error type surfaced by every connector operation.
///
/// Each facade call either returns a fully populated entity or exactly one
/// of these kinds. Nothing is retried internally; retry policy belongs to
/// the caller or a wrapper around the connector.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Missing or invalid credentials for a private call. Raised before any
    /// bytes are sent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Symbol or market id not present in the market registry.
    #[error("Market not found: {0}")]
    MarketNotFound(String),

    /// A caller-supplied argument the exchange cannot accept.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Network or connection failure, propagated unchanged from the HTTP
    /// transport.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response carried an explicit error envelope, or the exchange
    /// rejected the request outright. Carries the connector id and the raw
    /// payload for diagnostics.
    #[error("{exchange} exchange error: {payload}")]
    Exchange {
        exchange: String,
        payload: serde_json::Value,
    },

    /// The response lacked a required field or had the wrong shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Failed to encode an outgoing request body.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ExchangeError {
    /// Wrap a raw payload that contained an error envelope.
    pub fn exchange(exchange: impl Into<String>, payload: serde_json::Value) -> Self {
        Self::Exchange {
            exchange: exchange.into(),
            payload,
        }
    }
}
