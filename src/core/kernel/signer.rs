use crate::core::errors::ExchangeError;
use std::collections::HashMap;

/// Output of a signing step: everything the transport must attach to the
/// outgoing request.
#[derive(Debug, Default)]
pub struct SignedRequest {
    /// Headers to set (API key, signature, content type, ...).
    pub headers: HashMap<String, String>,
    /// Query parameters to append to the URL.
    pub query_params: Vec<(String, String)>,
    /// Replacement request body, for schemes that fold authentication
    /// material (nonce, method name) into the body they sign. `None`
    /// leaves the caller-supplied body untouched.
    pub body: Option<Vec<u8>>,
}

/// Result type for signing operations.
pub type SignatureResult = Result<SignedRequest, ExchangeError>;

/// Pluggable request authentication.
///
/// One implementation per exchange authentication scheme. The transport
/// invokes this for every authenticated request; public requests never
/// reach a signer.
pub trait Signer: Send + Sync {
    /// Sign a request.
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, ...)
    /// * `endpoint` - API endpoint path
    /// * `query_string` - query string without the leading `?`
    /// * `body` - raw request body bytes as built by the caller
    /// * `timestamp` - request timestamp in milliseconds
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        body: &[u8],
        timestamp: u64,
    ) -> SignatureResult;
}
