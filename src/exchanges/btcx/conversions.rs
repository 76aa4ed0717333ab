use crate::core::errors::ExchangeError;
use crate::core::types::{
    AccountBalances, Balance, Market, OrderAck, OrderBook, OrderBookLevel, Ticker, Trade,
    TradeSide,
};
use crate::exchanges::btcx::types::{
    BtcxBalances, BtcxBookLevel, BtcxOrderAck, BtcxOrderBook, BtcxTicker, BtcxTrade,
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;

fn malformed(entity: &str, err: impl std::fmt::Display) -> ExchangeError {
    ExchangeError::MalformedResponse(format!("btcx {entity}: {err}"))
}

/// Convert a raw depth payload into the uniform order book.
///
/// Level ordering is taken from the exchange as-is; only the non-negative
/// price/amount invariant is enforced here.
pub fn convert_order_book(raw: &Value, market: &Market) -> Result<OrderBook, ExchangeError> {
    let book: BtcxOrderBook =
        serde_json::from_value(raw.clone()).map_err(|e| malformed("order book", e))?;

    let convert_side = |levels: &[BtcxBookLevel]| {
        levels
            .iter()
            .map(|level| {
                if level.price.0.is_sign_negative() || level.amount.0.is_sign_negative() {
                    return Err(malformed(
                        "order book",
                        format!("negative level {}@{}", level.amount.0, level.price.0),
                    ));
                }
                Ok(OrderBookLevel {
                    price: level.price.0,
                    amount: level.amount.0,
                })
            })
            .collect::<Result<Vec<_>, ExchangeError>>()
    };

    Ok(OrderBook {
        symbol: market.symbol.clone(),
        bids: convert_side(&book.bids)?,
        asks: convert_side(&book.asks)?,
        timestamp: book.time.map(|seconds| seconds * 1000),
    })
}

/// Convert a raw ticker payload into the uniform ticker.
///
/// The BTCX feed labels the best bid `sell` and the best ask `buy`; fields
/// the feed does not carry stay explicitly absent rather than defaulting
/// to zero.
pub fn convert_ticker(raw: &Value, market: &Market) -> Result<Ticker, ExchangeError> {
    let ticker: BtcxTicker =
        serde_json::from_value(raw.clone()).map_err(|e| malformed("ticker", e))?;

    Ok(Ticker {
        symbol: market.symbol.clone(),
        timestamp: ticker.time.map(|seconds| seconds * 1000),
        high: ticker.high.map(|v| v.0),
        low: ticker.low.map(|v| v.0),
        bid: ticker.sell.map(|v| v.0),
        ask: ticker.buy.map(|v| v.0),
        vwap: None,
        open: None,
        close: None,
        last: ticker.last.map(|v| v.0),
        change: None,
        percentage: None,
        average: None,
        base_volume: None,
        quote_volume: ticker.volume.map(|v| v.0),
    })
}

/// Convert one raw trade.
///
/// Side mapping follows the exchange's discriminator: `"ask"` is a sell,
/// any other present value is a buy. A trade without a discriminator is a
/// malformed response.
pub fn convert_trade(raw: &Value, market: &Market) -> Result<Trade, ExchangeError> {
    let trade: BtcxTrade = serde_json::from_value(raw.clone()).map_err(|e| malformed("trade", e))?;

    let side = if trade.side == "ask" {
        TradeSide::Sell
    } else {
        TradeSide::Buy
    };

    Ok(Trade {
        id: trade.id.0,
        timestamp: trade.date * 1000,
        symbol: market.symbol.clone(),
        side,
        price: trade.price.0,
        amount: trade.amount.0,
        raw: raw.clone(),
    })
}

/// Convert a raw trade-list payload.
pub fn convert_trades(raw: &Value, market: &Market) -> Result<Vec<Trade>, ExchangeError> {
    let entries = raw
        .as_array()
        .ok_or_else(|| malformed("trade list", "expected an array"))?;
    entries
        .iter()
        .map(|entry| convert_trade(entry, market))
        .collect()
}

/// Convert a raw balance payload into uniform per-currency balances.
///
/// Currency codes are uppercased. BTCX does not report locked funds here,
/// so `used` is zero and `total` equals `free`.
pub fn convert_balances(raw: &Value) -> Result<AccountBalances, ExchangeError> {
    let balances: BtcxBalances =
        serde_json::from_value(raw.clone()).map_err(|e| malformed("balance", e))?;

    let mut result = BTreeMap::new();
    for (currency, amount) in balances {
        result.insert(
            currency.to_uppercase(),
            Balance {
                free: amount.0,
                used: Decimal::ZERO,
                total: amount.0,
            },
        );
    }

    Ok(AccountBalances {
        balances: result,
        raw: raw.clone(),
    })
}

/// Convert a raw order acknowledgement into the minimal order handle.
pub fn convert_order_ack(raw: &Value) -> Result<OrderAck, ExchangeError> {
    let ack: BtcxOrderAck =
        serde_json::from_value(raw.clone()).map_err(|e| malformed("order ack", e))?;
    Ok(OrderAck {
        id: ack.order.id.0,
        raw: raw.clone(),
    })
}
