//! API client for the futures REST endpoints.
//!
//! This module contains:
//!
//! - [`rest`] - HTTP client for REST API endpoints
//! - [`auth`] - HMAC-SHA256 request signing

pub mod auth;
pub mod rest;

pub use auth::{QueryParams, SignedRequest, Signer};
pub use rest::RestClient;
