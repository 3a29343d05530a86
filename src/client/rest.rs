//! HTTP REST client for the futures API.
//!
//! This module provides the [`RestClient`] for making signed and unsigned
//! HTTP requests to the futures REST endpoints.
//!
//! # Example
//!
//! ```rust,no_run
//! use fapi_trading::client::RestClient;
//! use fapi_trading::Config;
//!
//! # async fn example() -> fapi_trading::Result<()> {
//! let client = RestClient::new(&Config::new("api-key", "api-secret"))?;
//! assert!(client.ping().await?);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::client::auth::{QueryParams, Signer, API_KEY_HEADER};
use crate::config::Config;
use crate::error::{ApiError, Error};
use crate::logging::{truncate_body, LogSink};

/// Connectivity check endpoint
pub const PING_PATH: &str = "/fapi/v1/ping";

/// Order placement endpoint
pub const ORDER_PATH: &str = "/fapi/v1/order";

/// HTTP client for the futures REST API
///
/// Holds one pooled connection client with the API key header applied, so it
/// can be shared across tasks and reused for every call.
#[derive(Debug)]
pub struct RestClient {
    client: Client,
    base_url: String,
    signer: Signer,
    log: Arc<dyn LogSink>,
}

impl RestClient {
    /// Create a new REST client
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the API key or secret is empty, the key
    /// is not a valid header value or the base URL is not an HTTP(S) URL.
    /// Returns [`Error::Http`] if the HTTP client cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, Error> {
        if config.api_key().is_empty() || config.api_secret().is_empty() {
            return Err(Error::Config(
                "API key and secret must not be empty".to_string(),
            ));
        }

        let base_url = Url::parse(config.rest_base_url())
            .map_err(|e| Error::Config(format!("Invalid base URL: {}", e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Unsupported base URL scheme: {}",
                base_url.scheme()
            )));
        }

        let signer = Signer::new(config.api_secret())?;

        let mut api_key = HeaderValue::from_str(config.api_key())
            .map_err(|e| Error::Config(format!("Invalid API key: {}", e)))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.rest_base_url().to_string(),
            signer,
            log: Arc::clone(config.log_sink()),
        })
    }

    /// Send a request and return the decoded JSON body.
    ///
    /// Signed requests get a fresh `timestamp` and `signature`; unsigned ones
    /// are sent as-is. Parameters always travel form-encoded in the query.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] for any status >= 400
    /// - [`Error::Http`] for connection failures and timeouts
    /// - [`Error::Decode`] if a successful response is not valid JSON
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: QueryParams,
        signed: bool,
    ) -> Result<Value, Error> {
        let (query, logged) = if signed {
            let stamped = self.signer.sign_now(params);
            (stamped.query().to_string(), stamped.params().clone())
        } else {
            (params.encode(), params)
        };

        let url = if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        };

        self.log.debug(&format!(
            "REQUEST  {} {}{} params={:?}",
            method,
            self.base_url,
            path,
            logged.iter().collect::<Vec<_>>()
        ));

        let response = self.client.request(method.clone(), &url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        self.log.debug(&format!(
            "RESPONSE {} {}{} status={} body={}",
            method,
            self.base_url,
            path,
            status.as_u16(),
            truncate_body(&body)
        ));

        self.handle_response(status.as_u16(), &body)
    }

    /// Classify a response by status and decode its body
    fn handle_response(&self, status: u16, body: &str) -> Result<Value, Error> {
        if status >= 400 {
            let err = ApiError::from_response(status, body);
            self.log.error(&err.to_string());
            return Err(Error::Api(err));
        }

        serde_json::from_str(body).map_err(Error::from)
    }

    /// Test connectivity to the REST API.
    ///
    /// Returns `true` only if the server answers with an empty JSON object.
    pub async fn ping(&self) -> Result<bool, Error> {
        let result = self
            .request(Method::GET, PING_PATH, QueryParams::new(), false)
            .await?;
        let ok = result.as_object().is_some_and(|o| o.is_empty());
        self.log.info(&format!("Ping result: {} ({})", ok, result));
        Ok(ok)
    }

    /// Place a new futures order (signed `POST /fapi/v1/order`).
    ///
    /// Every field is forwarded as a request parameter; the decoded response
    /// is returned untouched.
    pub async fn place_order(&self, fields: QueryParams) -> Result<Value, Error> {
        self.request(Method::POST, ORDER_PATH, fields, true).await
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the log sink requests are traced to
    pub fn log_sink(&self) -> &Arc<dyn LogSink> {
        &self.log
    }
}
