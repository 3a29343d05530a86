//! API types for futures order requests and responses.
//!
//! - [`order`] - Order-related types (Side, OrderType, OrderParams, etc.)

pub mod order;

pub use order::{OrderParams, OrderResponse, OrderType, ResponseType, Side, TimeInForce};

/// Timestamp in milliseconds since Unix epoch
pub type TimestampMs = u64;
