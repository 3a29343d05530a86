//! Order placement.
//!
//! Bridges validated [`OrderParams`] and the [`RestClient`]: builds the wire
//! payload, submits it signed, and hands back the exchange's response as-is.

use serde_json::Value;

use crate::client::auth::QueryParams;
use crate::client::RestClient;
use crate::error::Error;
use crate::types::{OrderParams, OrderType, ResponseType, TimeInForce};

/// Build the form fields for a new order.
///
/// Quantities and prices are written from their exact decimal form. LIMIT
/// orders additionally carry `price` and `timeInForce=GTC`.
pub fn build_payload(params: &OrderParams) -> QueryParams {
    let mut payload = QueryParams::new()
        .with("symbol", params.symbol())
        .with("side", params.side().as_str())
        .with("type", params.order_type().as_str())
        .with("quantity", params.quantity().to_string())
        .with("newOrderRespType", ResponseType::Result.as_str());

    if params.order_type() == OrderType::Limit {
        if let Some(price) = params.price() {
            payload.push("price", price.to_string());
        }
        payload.push("timeInForce", TimeInForce::GoodTilCancelled.as_str());
    }

    payload
}

/// Submit `params` and return the raw API response.
///
/// # Errors
///
/// [`Error::Api`] when the exchange rejects the order, [`Error::Http`] when
/// the outcome is unknown.
pub async fn place_order(client: &RestClient, params: &OrderParams) -> Result<Value, Error> {
    let payload = build_payload(params);
    let log = client.log_sink();

    let price = params
        .price()
        .map(|p| format!(" price={}", p))
        .unwrap_or_default();
    log.info(&format!(
        "Placing {} {} order: symbol={} qty={}{}",
        params.side(),
        params.order_type(),
        params.symbol(),
        params.quantity(),
        price
    ));

    let response = client.place_order(payload).await?;

    log.info(&format!(
        "Order response: orderId={} status={} executedQty={} avgPrice={}",
        field(&response, "orderId"),
        field(&response, "status"),
        field(&response, "executedQty"),
        field(&response, "avgPrice"),
    ));

    Ok(response)
}

fn field<'a>(response: &'a Value, key: &str) -> &'a Value {
    response.get(key).unwrap_or(&Value::Null)
}
