//! Input validation for order parameters.
//!
//! Every check here is pure: it takes untyped user input and either returns a
//! normalized value or the first [`ValidationError`] it hits. Nothing is sent
//! anywhere until [`validate_order`] has produced an [`OrderParams`].
//!
//! ```rust
//! use fapi_trading::validation::validate_order;
//!
//! let params = validate_order(" btcusdt ", "buy", "limit", "0.01", Some("50000")).unwrap();
//! assert_eq!(params.symbol(), "BTCUSDT");
//! assert_eq!(params.price().map(|p| p.to_string()), Some("50000".to_string()));
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::{OrderParams, OrderType, Side};

/// Minimum symbol length
pub const SYMBOL_MIN_LEN: usize = 2;
/// Maximum symbol length
pub const SYMBOL_MAX_LEN: usize = 20;

/// Largest scale a `Decimal` can carry
const MAX_SCALE: i64 = 28;

/// Return the uppercased symbol or fail unless it is 2-20 ASCII letters
pub fn validate_symbol(symbol: &str) -> Result<String, ValidationError> {
    let symbol = symbol.trim().to_uppercase();
    let valid = (SYMBOL_MIN_LEN..=SYMBOL_MAX_LEN).contains(&symbol.len())
        && symbol.bytes().all(|b| b.is_ascii_uppercase());
    if !valid {
        return Err(ValidationError::InvalidSymbol(symbol));
    }
    Ok(symbol)
}

/// Parse `BUY` or `SELL`, ignoring case and surrounding whitespace
pub fn validate_side(side: &str) -> Result<Side, ValidationError> {
    side.trim().to_uppercase().parse()
}

/// Parse `MARKET` or `LIMIT`, ignoring case and surrounding whitespace
pub fn validate_order_type(order_type: &str) -> Result<OrderType, ValidationError> {
    order_type.trim().to_uppercase().parse()
}

/// Parse a strictly positive quantity without rounding
pub fn validate_quantity(quantity: &str) -> Result<Decimal, ValidationError> {
    let qty = parse_decimal(quantity)
        .ok_or_else(|| ValidationError::InvalidQuantity(quantity.to_string()))?;
    if qty <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveQuantity(qty));
    }
    Ok(qty)
}

/// Validate the price for an order of type `order_type`.
///
/// MARKET orders carry no price: the input is ignored and `None` returned.
/// LIMIT orders require a strictly positive price.
pub fn validate_price(
    price: Option<&str>,
    order_type: OrderType,
) -> Result<Option<Decimal>, ValidationError> {
    if order_type != OrderType::Limit {
        return Ok(None);
    }

    let raw = price.ok_or(ValidationError::MissingPrice)?;
    let price =
        parse_decimal(raw).ok_or_else(|| ValidationError::InvalidPrice(raw.to_string()))?;
    if price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice(price));
    }
    Ok(Some(price))
}

/// Run full validation and return an [`OrderParams`].
///
/// Checks run in order (symbol, side, type, quantity, price) and the first
/// failure is returned.
pub fn validate_order(
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: &str,
    price: Option<&str>,
) -> Result<OrderParams, ValidationError> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let order_type = validate_order_type(order_type)?;
    let quantity = validate_quantity(quantity)?;
    let price = validate_price(price, order_type)?;
    Ok(OrderParams::new(symbol, side, order_type, quantity, price))
}

/// Exact decimal parse accepting plain (`0.01`) and scientific (`1e-2`) forms.
///
/// Values that `Decimal` cannot hold without rounding are rejected.
fn parse_decimal(input: &str) -> Option<Decimal> {
    let input = input.trim();
    match input.split_once(|c: char| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => {
            let mantissa = Decimal::from_str_exact(mantissa).ok()?;
            let exponent: i64 = exponent.parse().ok()?;
            scale_exact(mantissa, exponent)
        }
        None => Decimal::from_str_exact(input).ok(),
    }
}

/// `mantissa * 10^exponent`, or `None` if the result would need rounding
fn scale_exact(mantissa: Decimal, exponent: i64) -> Option<Decimal> {
    let mut digits = mantissa.mantissa();
    let mut scale = i64::from(mantissa.scale()).checked_sub(exponent)?;

    while scale > MAX_SCALE && digits % 10 == 0 && digits != 0 {
        digits /= 10;
        scale -= 1;
    }
    if digits == 0 {
        return Some(Decimal::ZERO);
    }
    if scale < 0 {
        let factor = 10i128.checked_pow(u32::try_from(-scale).ok()?)?;
        digits = digits.checked_mul(factor)?;
        scale = 0;
    }

    let scale = u32::try_from(scale).ok()?;
    Decimal::try_from_i128_with_scale(digits, scale).ok()
}
