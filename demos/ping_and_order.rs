//! Probe connectivity and place a small testnet order.
//!
//! ```bash
//! BINANCE_API_KEY=... BINANCE_API_SECRET=... RUST_LOG=fapi_trading=debug \
//!     cargo run --example ping_and_order -- BTCUSDT BUY LIMIT 0.01 50000
//! ```
use fapi_trading::types::OrderResponse;
use fapi_trading::validation::validate_order;
use fapi_trading::{Config, TradingClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |i: usize, default: &'static str| args.get(i).map(String::as_str).unwrap_or(default);

    // Validate before touching the network
    let order = validate_order(
        arg(0, "BTCUSDT"),
        arg(1, "BUY"),
        arg(2, "MARKET"),
        arg(3, "0.01"),
        args.get(4).map(String::as_str),
    )?;
    println!("Order: {:?}", order);

    let config = Config::from_env()?;
    println!("Base URL: {}", config.rest_base_url());
    let client = TradingClient::new(config)?;

    if !client.ping().await? {
        println!("Exchange did not answer the connectivity check");
        return Ok(());
    }

    match client.submit_order(&order).await {
        Ok(response) => match OrderResponse::from_value(&response) {
            Ok(typed) => println!(
                "orderId={} status={} executedQty={:?} avgPrice={:?}",
                typed.order_id, typed.status, typed.executed_qty, typed.avg_price
            ),
            Err(_) => println!("Response: {}", response),
        },
        Err(e) if e.is_api() => println!("Rejected: {}", e),
        Err(e) if e.is_transport() => println!("Outcome unknown, check open orders: {}", e),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
