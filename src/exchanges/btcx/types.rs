use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Decimal field as BTCX sends it: usually a string, occasionally a bare
/// JSON number. Anything else fails decode, which the dispatcher reports
/// as a malformed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireDecimal(pub Decimal);

impl<'de> Deserialize<'de> for WireDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let raw = Raw::deserialize(deserializer)?;
        let text = match &raw {
            Raw::Text(s) => s.clone(),
            Raw::Number(n) => n.to_string(),
        };
        Decimal::from_str(&text)
            .map(WireDecimal)
            .map_err(|e| serde::de::Error::custom(format!("invalid decimal {text:?}: {e}")))
    }
}

/// Identifier field that may arrive as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireId(pub String);

impl<'de> Deserialize<'de> for WireId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => WireId(s),
            Raw::Number(n) => WireId(n.to_string()),
        })
    }
}

/// One `GET depth/{id}/{limit}` level.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BtcxBookLevel {
    pub price: WireDecimal,
    pub amount: WireDecimal,
}

/// `GET depth/{id}/{limit}` response. `bids` and `asks` are required;
/// their absence is a malformed response, not an empty book.
#[derive(Debug, Clone, Deserialize)]
pub struct BtcxOrderBook {
    pub bids: Vec<BtcxBookLevel>,
    pub asks: Vec<BtcxBookLevel>,
    /// Epoch seconds, when present.
    #[serde(default)]
    pub time: Option<i64>,
}

/// `GET ticker/{id}` response. BTCX labels the best bid `sell` and the
/// best ask `buy`; every field the feed omits stays `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct BtcxTicker {
    /// Epoch seconds.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub high: Option<WireDecimal>,
    #[serde(default)]
    pub low: Option<WireDecimal>,
    #[serde(default)]
    pub sell: Option<WireDecimal>,
    #[serde(default)]
    pub buy: Option<WireDecimal>,
    #[serde(default)]
    pub last: Option<WireDecimal>,
    /// Quote-currency volume.
    #[serde(default)]
    pub volume: Option<WireDecimal>,
}

/// One entry of the `GET trade/{id}/{limit}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct BtcxTrade {
    pub id: WireId,
    /// Epoch seconds.
    pub date: i64,
    /// Side discriminator: `"ask"` means the taker sold. Required.
    #[serde(rename = "type")]
    pub side: String,
    pub price: WireDecimal,
    pub amount: WireDecimal,
}

/// `POST balance` response: currency code to available amount. The
/// exchange does not report locked funds through this call.
pub type BtcxBalances = BTreeMap<String, WireDecimal>;

/// `POST trade` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct BtcxOrderAck {
    pub order: BtcxOrder,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BtcxOrder {
    pub id: WireId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_decimal_accepts_strings_and_numbers() {
        let from_str: WireDecimal = serde_json::from_value(serde_json::json!("490.5")).unwrap();
        let from_num: WireDecimal = serde_json::from_value(serde_json::json!(490.5)).unwrap();
        assert_eq!(from_str, from_num);
        assert_eq!(from_str.0, Decimal::from_str("490.5").unwrap());
    }

    #[test]
    fn wire_decimal_rejects_other_shapes() {
        assert!(serde_json::from_value::<WireDecimal>(serde_json::json!(["490"])).is_err());
        assert!(serde_json::from_value::<WireDecimal>(serde_json::json!("not a number")).is_err());
    }

    #[test]
    fn wire_id_normalizes_numbers_to_strings() {
        let id: WireId = serde_json::from_value(serde_json::json!(12345)).unwrap();
        assert_eq!(id.0, "12345");
        let id: WireId = serde_json::from_value(serde_json::json!("abc-1")).unwrap();
        assert_eq!(id.0, "abc-1");
    }

    #[test]
    fn trade_without_discriminator_fails_decode() {
        let value = serde_json::json!({
            "id": "1", "date": 1000, "price": "490", "amount": "0.5"
        });
        assert!(serde_json::from_value::<BtcxTrade>(value).is_err());
    }
}
