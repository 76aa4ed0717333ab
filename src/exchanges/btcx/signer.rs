use crate::core::errors::ExchangeError;
use crate::core::kernel::{SignatureResult, SignedRequest, Signer};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha512 = Hmac<Sha512>;

/// BTCX request signer.
///
/// Private requests carry a urlencoded body; this signer appends a fresh
/// nonce to it, signs the final body with HMAC-SHA512 over the secret key,
/// and emits `Key` / `Signature` headers. The nonce must never repeat or
/// decrease for one set of credentials or the exchange rejects the call,
/// so it lives in a shared atomic advanced with `max(prev + 1, now_ms)`.
pub struct BtcxSigner {
    api_key: String,
    secret_key: String,
    nonce: AtomicU64,
}

impl BtcxSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        let nonce = AtomicU64::new(Self::now_millis());
        Self {
            api_key,
            secret_key,
            nonce,
        }
    }

    fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Next strictly-increasing nonce, safe under concurrent callers.
    fn next_nonce(&self) -> u64 {
        let now = Self::now_millis();
        let prev = self
            .nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(std::cmp::max(prev + 1, now))
            })
            .unwrap_or(now);
        std::cmp::max(prev + 1, now)
    }

    fn hmac_sha512_hex(&self, payload: &str) -> Result<String, ExchangeError> {
        let mut mac = HmacSha512::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| ExchangeError::Configuration(format!("Invalid secret key: {}", e)))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Signer for BtcxSigner {
    fn sign_request(
        &self,
        _method: &str,
        _endpoint: &str,
        _query_string: &str,
        body: &[u8],
        _timestamp: u64, // The nonce doubles as the freshness proof.
    ) -> SignatureResult {
        let body_str = std::str::from_utf8(body).map_err(|e| {
            ExchangeError::Serialization(format!("Request body is not valid UTF-8: {}", e))
        })?;

        let nonce = self.next_nonce();
        let signed_body = if body_str.is_empty() {
            format!("Nonce={nonce}")
        } else {
            format!("{body_str}&Nonce={nonce}")
        };

        let signature = self.hmac_sha512_hex(&signed_body)?;

        let mut headers = HashMap::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        headers.insert("Key".to_string(), self.api_key.clone());
        headers.insert("Signature".to_string(), signature);

        Ok(SignedRequest {
            headers,
            query_params: Vec::new(),
            body: Some(signed_body.into_bytes()),
        })
    }
}
