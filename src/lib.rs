pub mod core;
pub mod exchanges;

pub use crate::core::config::ExchangeConfig;
pub use crate::core::errors::ExchangeError;
pub use crate::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
pub use crate::core::types::*;
pub use crate::exchanges::btcx::BtcxConnector;
