use crate::core::errors::ExchangeError;
use crate::core::types::{Market, Symbol};
use std::collections::HashMap;

/// Static market registry for BTCX.
///
/// Populated once at connector construction from the exchange's known
/// listing. Lookups are total over that listing and fail loudly for
/// anything else; a guessed market is never returned.
#[derive(Debug, Clone)]
pub struct BtcxMarkets {
    by_symbol: HashMap<String, Market>,
    by_id: HashMap<String, Market>,
}

impl BtcxMarkets {
    /// The exchange's listed pairs.
    pub fn bootstrap() -> Self {
        let listed = [
            ("btc/usd", "BTC", "USD"),
            ("btc/eur", "BTC", "EUR"),
        ];

        let mut by_symbol = HashMap::new();
        let mut by_id = HashMap::new();
        for (id, base, quote) in listed {
            let symbol = Symbol {
                base: base.to_string(),
                quote: quote.to_string(),
            };
            let market = Market::new(id, symbol.clone());
            by_symbol.insert(symbol.to_string(), market.clone());
            by_id.insert(id.to_string(), market);
        }

        Self { by_symbol, by_id }
    }

    /// Resolve a normalized `"BASE/QUOTE"` symbol to its market.
    pub fn resolve(&self, symbol: &str) -> Result<&Market, ExchangeError> {
        self.by_symbol
            .get(symbol)
            .ok_or_else(|| ExchangeError::MarketNotFound(symbol.to_string()))
    }

    /// Resolve an exchange-native market id back to its market.
    pub fn reverse(&self, market_id: &str) -> Result<&Market, ExchangeError> {
        self.by_id
            .get(market_id)
            .ok_or_else(|| ExchangeError::MarketNotFound(market_id.to_string()))
    }

    /// All listed markets.
    pub fn all(&self) -> Vec<Market> {
        let mut markets: Vec<Market> = self.by_symbol.values().cloned().collect();
        markets.sort_by(|a, b| a.id.cmp(&b.id));
        markets
    }
}
