//! Example: Account and trading endpoints.
//!
//! Run with: cargo run --example private_trading
//! Requires `EXMO_API_KEY` and `EXMO_API_SECRET`.

use std::sync::Arc;
use std::time::Duration;

use exmo_api_client::auth::EnvCredentials;
use exmo_api_client::rest::{AuthenticatedClient, Transport};
use exmo_api_client::types::OrderType;
use exmo_api_client::ExmoError;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let credentials = EnvCredentials::from_env()?;
    let transport = Transport::builder()
        .credentials(Arc::new(credentials))
        .connection_attempts(3)
        .timeout(Duration::from_secs(10))
        .build()?;
    let client = AuthenticatedClient::new(Arc::new(transport))?;

    println!("=== Balances ===");
    let info = client.user_info().await?;
    if let Some(balances) = info["balances"].as_object() {
        for (currency, amount) in balances {
            if amount.as_f64().unwrap_or_default() > 0.0 {
                println!("{currency}: {amount}");
            }
        }
    }

    println!("\n=== Open Orders ===");
    println!("{}", client.user_open_orders().await?);

    println!("\n=== Cost of 0.001 BTC ===");
    let cost = client
        .required_amount("BTC_USD", Decimal::new(1, 3))
        .await?;
    println!("Amount: {} (avg price {})", cost["amount"], cost["avg_price"]);

    println!("\n=== Place a far-from-market order ===");
    match client
        .order_create("BTC_USD", Decimal::new(1, 3), Decimal::new(1, 0), OrderType::Buy)
        .await
    {
        Ok(order) => {
            let order_id = order["order_id"].as_i64().unwrap_or_default();
            println!("Created order {order_id}");
            client.order_cancel(order_id as u64).await?;
            println!("Cancelled order {order_id}");
        }
        Err(ExmoError::Api(err)) if err.is_insufficient_funds() => {
            println!("Not enough funds: {err}");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
