use crate::core::errors::ExchangeError;

/// All private calls are POSTed to this single signed endpoint; the wire
/// method travels in the body.
pub const PRIVATE_ENDPOINT: &str = "/private";

/// Public BTCX endpoints, each carrying its path template as data.
///
/// Templates use `{name}` placeholders filled from request parameters.
/// Market ids are substituted verbatim, slash included, matching the
/// exchange's own URL scheme (`depth/btc/usd/1000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicEndpoint {
    Depth,
    Ticker,
    Trades,
}

impl PublicEndpoint {
    pub fn template(self) -> &'static str {
        match self {
            Self::Depth => "/depth/{id}/{limit}",
            Self::Ticker => "/ticker/{id}",
            Self::Trades => "/trade/{id}/{limit}",
        }
    }

    /// Expand the path template with named parameters.
    ///
    /// A placeholder left unresolved means the caller built the request
    /// wrong; that is an error, not a request to send.
    pub fn path(self, params: &[(&str, &str)]) -> Result<String, ExchangeError> {
        let mut path = self.template().to_string();
        for (name, value) in params {
            path = path.replace(&format!("{{{name}}}"), value);
        }
        if path.contains('{') {
            return Err(ExchangeError::InvalidParameters(format!(
                "unresolved placeholder in endpoint path {path:?}"
            )));
        }
        Ok(path)
    }
}

/// Private wire methods BTCX accepts through the signed endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateMethod {
    Balance,
    Cancel,
    History,
    Order,
    Redeem,
    Trade,
    Withdraw,
}

impl PrivateMethod {
    /// Uppercase name carried in the `Method` body field.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Balance => "BALANCE",
            Self::Cancel => "CANCEL",
            Self::History => "HISTORY",
            Self::Order => "ORDER",
            Self::Redeem => "REDEEM",
            Self::Trade => "TRADE",
            Self::Withdraw => "WITHDRAW",
        }
    }
}
