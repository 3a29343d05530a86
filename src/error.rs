//! Error types for the fapi-trading crate.
//!
//! Failures fall into three disjoint categories that callers are expected to
//! handle differently:
//!
//! - [`Error::Validation`] - the input was rejected locally, nothing was sent
//! - [`Error::Api`] - the exchange received the request and rejected it
//! - [`Error::Http`] - the transport failed; the request may or may not have
//!   reached the exchange
//!
//! [`Error::Config`] and [`Error::Decode`] cover client misconfiguration and
//! malformed success bodies respectively.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for this crate
#[derive(Debug, Error)]
pub enum Error {
    /// Order input failed a domain rule
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// API returned an error response
    #[error("API error: {0}")]
    Api(ApiError),

    /// HTTP transport failed (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response carried a body that is not valid JSON
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid configuration (missing credentials, bad URL, bad header value)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Input was rejected before any network call
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// The exchange rejected the request
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// The outcome of the request is unknown (network failure or timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// The transport gave up waiting for the exchange
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// The API error, if this is one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

/// Error returned by the exchange for a request it received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Exchange error code, [`ApiError::UNKNOWN_CODE`] when the body had none
    pub code: i64,
    /// Error message, or the raw body when it could not be parsed
    pub message: String,
}

impl ApiError {
    /// Code used when the response body carries no usable error code
    pub const UNKNOWN_CODE: i64 = -1;

    /// Create an API error with an unknown error code
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Self::UNKNOWN_CODE,
            message: message.into(),
        }
    }

    /// Create an API error with an error code
    pub fn with_code(status: u16, code: i64, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Classify an error response from its status and raw body.
    ///
    /// A JSON object body supplies `code` and `msg`; anything else keeps the
    /// raw text as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        match parsed.as_ref().and_then(|v| v.as_object()) {
            Some(object) => {
                let code = object
                    .get("code")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(Self::UNKNOWN_CODE);
                let message = object
                    .get("msg")
                    .and_then(|v| v.as_str())
                    .unwrap_or(body)
                    .to_string();
                Self::with_code(status, code, message)
            }
            None => Self::new(status, body),
        }
    }

    /// Whether the exchange returned a code
    pub fn has_code(&self) -> bool {
        self.code != Self::UNKNOWN_CODE
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[HTTP {}] Binance error {}: {}",
            self.status, self.code, self.message
        )
    }
}

impl std::error::Error for ApiError {}

/// Order input that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Symbol is not 2-20 ASCII letters
    #[error("Invalid symbol '{0}'. Must be 2-20 uppercase letters (e.g. BTCUSDT).")]
    InvalidSymbol(String),

    /// Side is not BUY or SELL
    #[error("Invalid side '{0}'. Must be one of BUY, SELL.")]
    InvalidSide(String),

    /// Order type is not MARKET or LIMIT
    #[error("Invalid order type '{0}'. Must be one of MARKET, LIMIT.")]
    InvalidOrderType(String),

    /// Quantity is not a decimal number
    #[error("Invalid quantity '{0}'. Must be a positive number.")]
    InvalidQuantity(String),

    /// Quantity parsed but is zero or negative
    #[error("Quantity must be positive, got {0}.")]
    NonPositiveQuantity(Decimal),

    /// LIMIT order without a price
    #[error("Price is required for LIMIT orders.")]
    MissingPrice,

    /// Price is not a decimal number
    #[error("Invalid price '{0}'. Must be a positive number.")]
    InvalidPrice(String),

    /// Price parsed but is zero or negative
    #[error("Price must be positive, got {0}.")]
    NonPositivePrice(Decimal),
}
