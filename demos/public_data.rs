//! Example: Fetching public market data from EXMO.
//!
//! Run with: cargo run --example public_data
//! Set `RUST_LOG=exmo_api_client=debug` to see each request.

use exmo_api_client::rest::PublicClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Create a client for public endpoints (no credentials needed)
    let client = PublicClient::new()?;

    println!("=== Ping ===");
    println!("Reachable: {}", client.ping().await);

    println!("\n=== Currencies ===");
    let currencies = client.currency().await?;
    if let Some(list) = currencies.as_array() {
        println!("{} currencies, first: {}", list.len(), currencies[0]);
    }

    println!("\n=== Ticker (BTC_USD) ===");
    let ticker = client.ticker().await?;
    let btc = &ticker["BTC_USD"];
    println!("Last trade: {}", btc["last_trade"]);
    println!("Buy/Sell: {} / {}", btc["buy_price"], btc["sell_price"]);
    println!("24h volume: {}", btc["vol"]);

    println!("\n=== Order Book (BTC_USD, ETH_USD) ===");
    let book = client.order_book(["BTC_USD", "ETH_USD"], Some(5)).await?;
    for pair in ["BTC_USD", "ETH_USD"] {
        println!(
            "{pair}: ask_top={} bid_top={}",
            book[pair]["ask_top"], book[pair]["bid_top"]
        );
    }

    println!("\n=== Recent Trades (BTC_USD) ===");
    let trades = client.trades("BTC_USD").await?;
    if let Some(list) = trades["BTC_USD"].as_array() {
        for trade in list.iter().take(5) {
            println!(
                "{} {} @ {}",
                trade["type"], trade["quantity"], trade["price"]
            );
        }
    }

    println!("\n=== Pair Settings (BTC_USD) ===");
    let settings = client.pair_settings().await?;
    println!("{}", settings["BTC_USD"]);

    Ok(())
}
