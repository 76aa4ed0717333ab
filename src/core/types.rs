use crate::core::errors::ExchangeError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Normalized trading-pair identifier, independent of any exchange.
///
/// Rendered as `"BASE/QUOTE"` everywhere a string form is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub base: String,
    pub quote: String,
}

impl Symbol {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Result<Self, ExchangeError> {
        let base = base.into();
        let quote = quote.into();
        if base.is_empty() || quote.is_empty() {
            return Err(ExchangeError::InvalidParameters(
                "base and quote currencies cannot be empty".to_string(),
            ));
        }
        Ok(Self { base, quote })
    }

    /// Parse the normalized `"BASE/QUOTE"` form.
    pub fn parse(symbol: &str) -> Result<Self, ExchangeError> {
        match symbol.split_once('/') {
            Some((base, quote)) => Self::new(base, quote),
            None => Err(ExchangeError::InvalidParameters(format!(
                "expected BASE/QUOTE symbol, got {symbol:?}"
            ))),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// A trading pair as one exchange knows it: the exchange-native id paired
/// with the normalized symbol. Loaded once at connector construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub id: String,
    pub symbol: Symbol,
}

impl Market {
    pub fn new(id: impl Into<String>, symbol: Symbol) -> Self {
        Self {
            id: id.into(),
            symbol,
        }
    }
}

/// One price level of an order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    pub price: Decimal,
    pub amount: Decimal,
}

/// Order book snapshot. Bids descend and asks ascend by price, by
/// convention of the source exchange; levels are not re-sorted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    pub symbol: Symbol,
    pub bids: Vec<OrderBookLevel>,
    pub asks: Vec<OrderBookLevel>,
    /// Milliseconds since epoch, when the exchange supplies one.
    pub timestamp: Option<i64>,
}

/// Ticker snapshot. Every numeric field the exchange did not supply is
/// `None` — never a guessed zero, which would corrupt downstream math.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: Symbol,
    /// Milliseconds since epoch.
    pub timestamp: Option<i64>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub vwap: Option<Decimal>,
    pub open: Option<Decimal>,
    pub close: Option<Decimal>,
    pub last: Option<Decimal>,
    pub change: Option<Decimal>,
    pub percentage: Option<Decimal>,
    pub average: Option<Decimal>,
    pub base_volume: Option<Decimal>,
    pub quote_volume: Option<Decimal>,
}

/// Taker side of a public trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// A public trade, normalized. `raw` keeps the original payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    /// Milliseconds since epoch.
    pub timestamp: i64,
    pub symbol: Symbol,
    pub side: TradeSide,
    pub price: Decimal,
    pub amount: Decimal,
    pub raw: serde_json::Value,
}

/// Funds in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub free: Decimal,
    pub used: Decimal,
    pub total: Decimal,
}

/// Balances keyed by uppercased currency code, plus the unmodified
/// response for forensic use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalances {
    pub balances: BTreeMap<String, Balance>,
    pub raw: serde_json::Value,
}

impl AccountBalances {
    pub fn get(&self, currency: &str) -> Option<&Balance> {
        self.balances.get(&currency.to_uppercase())
    }
}

/// Minimal receipt for a placed order. The exchange is authoritative for
/// order state; no client-side state machine exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    pub id: String,
    pub raw: serde_json::Value,
}
