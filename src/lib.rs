//! # fapi-trading
//!
//! A signed-request Rust client for the Binance USDⓈ-M Futures REST API, with
//! a validation pipeline that turns raw user input into safe order parameters
//! before anything touches the network.
//!
//! ## Features
//!
//! - **Validation** - symbol, side, type, exact-decimal quantity and price
//! - **HMAC-SHA256 signing** - timestamped, form-encoded signed requests
//! - **Typed failures** - validation, API rejection and transport failure are
//!   distinct [`Error`] variants
//! - **Async/Await** - built on `reqwest`, safe to share across tasks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fapi_trading::validation::validate_order;
//! use fapi_trading::{Config, TradingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fapi_trading::Error> {
//!     // Reads BINANCE_API_KEY / BINANCE_API_SECRET
//!     let client = TradingClient::new(Config::from_env()?)?;
//!
//!     if client.ping().await? {
//!         let order = validate_order("btcusdt", "buy", "limit", "0.01", Some("50000"))?;
//!         let response = client.submit_order(&order).await?;
//!         println!("{}", response);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`validation`] - pure input checks producing [`OrderParams`](types::OrderParams)
//! - [`orders`] - wire payload construction and submission
//! - [`client`] - HMAC signing and the REST transport
//! - [`types`] - order enums, parameters and response view
//! - [`config`] - credentials, endpoint and timeout
//! - [`logging`] - injectable log sink
//! - [`error`] - error types for the crate
//!
//! ## Decimal Representation
//!
//! Quantities and prices are [`rust_decimal::Decimal`] from parsing to the
//! wire, so `0.1` is sent as `0.1` and never as a binary float approximation.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod orders;
pub mod types;
pub mod validation;

// Re-export main types at crate root for convenience
pub use config::Config;
pub use error::{ApiError, Error, ValidationError};

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// The main futures API client
///
/// Pairs a [`Config`] with a [`RestClient`](client::RestClient) and exposes
/// the two operations callers need: a connectivity check and order
/// submission.
///
/// # Example
///
/// ```rust,no_run
/// use fapi_trading::validation::validate_order;
/// use fapi_trading::{Config, TradingClient};
///
/// # async fn example() -> fapi_trading::Result<()> {
/// let client = TradingClient::new(Config::new("api-key", "api-secret"))?;
///
/// let order = validate_order("ETHUSDT", "SELL", "MARKET", "0.5", None)?;
/// let response = client.submit_order(&order).await?;
/// println!("status: {}", response["status"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TradingClient {
    config: Config,
    rest_client: client::RestClient,
}

impl TradingClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if either credential is empty or the HTTP client
    /// cannot be initialized.
    pub fn new(config: Config) -> Result<Self> {
        let rest_client = client::RestClient::new(&config)?;
        Ok(Self {
            config,
            rest_client,
        })
    }

    /// Check connectivity; `true` when the exchange answers `{}`
    pub async fn ping(&self) -> Result<bool> {
        self.rest_client.ping().await
    }

    /// Submit validated order parameters and return the raw response
    pub async fn submit_order(&self, params: &types::OrderParams) -> Result<serde_json::Value> {
        orders::place_order(&self.rest_client, params).await
    }

    /// Get a reference to the REST client
    pub fn rest(&self) -> &client::RestClient {
        &self.rest_client
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
