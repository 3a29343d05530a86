//! Order-related types.
//!
//! This module contains the validated order parameters and the enums that
//! carry the exchange's wire spellings.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ValidationError};

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy (go long)
    Buy,
    /// Sell (go short)
    Sell,
}

impl Side {
    /// Wire spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    /// Exact, case-sensitive match on the wire spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(ValidationError::InvalidSide(other.to_string())),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Market order - execute at best available price
    Market,
    /// Limit order - execute at the given price or better
    Limit,
}

impl OrderType {
    /// Wire spelling
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            other => Err(ValidationError::InvalidOrderType(other.to_string())),
        }
    }
}

/// Time in force for resting orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good til cancelled
    #[serde(rename = "GTC")]
    GoodTilCancelled,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Fill or kill
    #[serde(rename = "FOK")]
    FillOrKill,
}

impl TimeInForce {
    /// Wire spelling
    pub fn as_str(self) -> &'static str {
        match self {
            TimeInForce::GoodTilCancelled => "GTC",
            TimeInForce::ImmediateOrCancel => "IOC",
            TimeInForce::FillOrKill => "FOK",
        }
    }
}

/// Shape of the order placement response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseType {
    /// Acknowledgement only
    Ack,
    /// Final order state including fills
    Result,
}

impl ResponseType {
    /// Wire spelling
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseType::Ack => "ACK",
            ResponseType::Result => "RESULT",
        }
    }
}

/// Validated, immutable order parameters ready for submission.
///
/// Only [`validate_order`](crate::validation::validate_order) builds one, so
/// `price` is always `Some` for LIMIT orders and `None` for MARKET orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderParams {
    symbol: String,
    side: Side,
    order_type: OrderType,
    quantity: Decimal,
    price: Option<Decimal>,
}

impl OrderParams {
    pub(crate) fn new(
        symbol: String,
        side: Side,
        order_type: OrderType,
        quantity: Decimal,
        price: Option<Decimal>,
    ) -> Self {
        debug_assert_eq!(price.is_some(), order_type == OrderType::Limit);
        Self {
            symbol,
            side,
            order_type,
            quantity,
            price,
        }
    }

    /// Uppercase trading pair, e.g. `BTCUSDT`
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Order side
    pub fn side(&self) -> Side {
        self.side
    }

    /// Order type
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Strictly positive quantity
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Limit price (present only for LIMIT orders)
    pub fn price(&self) -> Option<Decimal> {
        self.price
    }
}

/// Typed view of an order placement response.
///
/// Quantities and prices arrive as decimal strings and are parsed exactly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Exchange order ID
    pub order_id: i64,
    /// Order status, e.g. `NEW` or `FILLED`
    pub status: String,
    /// Trading pair
    pub symbol: String,
    /// Order side
    pub side: Side,
    /// Order type as reported by the exchange
    #[serde(rename = "type")]
    pub order_type: String,
    /// Client order ID
    #[serde(default)]
    pub client_order_id: Option<String>,
    /// Original quantity
    #[serde(default)]
    pub orig_qty: Option<Decimal>,
    /// Executed quantity
    #[serde(default)]
    pub executed_qty: Option<Decimal>,
    /// Average fill price
    #[serde(default)]
    pub avg_price: Option<Decimal>,
    /// Limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Cumulative quote asset filled
    #[serde(default)]
    pub cum_quote: Option<Decimal>,
    /// Time in force
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    /// Last update time (ms)
    #[serde(default)]
    pub update_time: Option<u64>,
}

impl OrderResponse {
    /// Interpret a decoded order response
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if required fields are missing or malformed.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, Error> {
        Ok(Self::deserialize(value)?)
    }
}
