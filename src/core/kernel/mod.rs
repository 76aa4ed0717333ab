//! Unified transport layer shared by all exchange connectors.
//!
//! The kernel contains no exchange-specific logic. It provides:
//!
//! - [`RestClient`]: the HTTP seam connectors call through, with a
//!   [`ReqwestRest`] production implementation that owns timeouts and the
//!   optional minimum inter-request interval.
//! - [`Signer`]: pluggable per-exchange request authentication. A signer
//!   receives the request the connector built and returns the headers,
//!   query parameters, and (for form-body schemes) the rewritten body the
//!   transport must send.
//!
//! Connectors compose these through their builders; tests substitute the
//! `RestClient` trait with canned payloads.

pub mod rest;
pub mod signer;

pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, SignedRequest, Signer};
