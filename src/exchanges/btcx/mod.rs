//! BTCX connector: adapts the BTCX REST API to the uniform contract.
//!
//! Public market data goes through templated GET paths; every private
//! call POSTs a form body to one signed endpoint with the wire method
//! name inside the body (HMAC-SHA512, nonce-protected).

pub mod builder;
pub mod connector;
pub mod conversions;
pub mod endpoints;
pub mod markets;
pub mod rest;
pub mod signer;
pub mod types;

pub use builder::build_connector;
pub use connector::BtcxConnector;
pub use markets::BtcxMarkets;
pub use signer::BtcxSigner;

/// Stable connector id, carried in error payloads and logs.
pub const EXCHANGE_ID: &str = "btcx";

/// Exchange default entry limit, shared by the depth and trade-list endpoints.
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;
