//! HMAC-SHA256 authentication for signed futures API requests.
//!
//! Signed endpoints require two extra query parameters:
//!
//! - `timestamp`: Unix time in milliseconds when the request was built
//! - `signature`: hex HMAC-SHA256 of the form-encoded query (everything before
//!   `signature`), keyed with the API secret
//!
//! The API key itself travels in the `X-MBX-APIKEY` header and the secret is
//! never sent.
//!
//! # Example
//!
//! ```rust
//! use fapi_trading::client::auth::{QueryParams, Signer};
//!
//! let signer = Signer::new("secret").unwrap();
//! let mut params = QueryParams::new();
//! params.push("symbol", "BTCUSDT");
//!
//! let signed = signer.sign(params, 1_700_000_000_000);
//! assert!(signed.query().starts_with("symbol=BTCUSDT&timestamp=1700000000000&signature="));
//! ```

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

use crate::error::Error;
use crate::types::TimestampMs;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key (`X-MBX-APIKEY`; header names are stored lowercase)
pub const API_KEY_HEADER: &str = "x-mbx-apikey";

/// Name of the timestamp parameter
pub const TIMESTAMP_PARAM: &str = "timestamp";

/// Name of the signature parameter
pub const SIGNATURE_PARAM: &str = "signature";

/// Ordered request parameters.
///
/// Insertion order is preserved in the encoded query, which is also the
/// exact byte string that gets signed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Builder-style [`push`](Self::push)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove every value stored under `key`
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-encode as `k1=v1&k2=v2`
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// A parameter set carrying `timestamp` and `signature`, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: QueryParams,
    query: String,
    signature: String,
}

impl SignedRequest {
    /// All parameters, `signature` last
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// The encoded query to transmit
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Hex-encoded HMAC-SHA256 signature
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Timestamp the signature covers
    pub fn timestamp(&self) -> Option<TimestampMs> {
        self.params.get(TIMESTAMP_PARAM)?.parse().ok()
    }
}

/// HMAC-SHA256 signer keyed with the API secret
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Create a new signer from the API secret
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty.
    pub fn new(api_secret: &str) -> Result<Self, Error> {
        if api_secret.is_empty() {
            return Err(Error::Config("API secret must not be empty".to_string()));
        }
        let mac = HmacSha256::new_from_slice(api_secret.as_bytes())
            .map_err(|e| Error::Config(format!("Invalid API secret: {}", e)))?;
        Ok(Self { mac })
    }

    /// Hex HMAC-SHA256 of `payload`
    pub fn digest(&self, payload: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Stamp and sign `params`.
    ///
    /// Any `timestamp` or `signature` already present is discarded first, so
    /// a parameter set can be re-signed without carrying a stale timestamp.
    pub fn sign(&self, mut params: QueryParams, timestamp_ms: TimestampMs) -> SignedRequest {
        params.remove(TIMESTAMP_PARAM);
        params.remove(SIGNATURE_PARAM);
        params.push(TIMESTAMP_PARAM, timestamp_ms.to_string());

        let payload = params.encode();
        let signature = self.digest(&payload);
        params.push(SIGNATURE_PARAM, signature.clone());

        let query = format!("{}&{}={}", payload, SIGNATURE_PARAM, signature);
        SignedRequest {
            params,
            query,
            signature,
        }
    }

    /// Sign with the current time
    pub fn sign_now(&self, params: QueryParams) -> SignedRequest {
        self.sign(params, Self::current_timestamp_ms())
    }

    /// Get the current timestamp in milliseconds
    pub fn current_timestamp_ms() -> TimestampMs {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as TimestampMs)
            .unwrap_or_default()
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}
