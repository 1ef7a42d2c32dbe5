//! Example: Working with ExmoError and ApiError.
//!
//! Run with: cargo run --example error_handling

use exmo_api_client::error::{ApiError, error_codes};
use exmo_api_client::types::OrderType;
use exmo_api_client::ExmoError;

fn main() {
    let api_error = ApiError::new("Error 50054: Insufficient funds");
    println!("API error: {}", api_error);
    println!("Code: {:?}", api_error.code());
    println!("Is insufficient funds: {}", api_error.is_insufficient_funds());

    let err = ExmoError::Api(api_error.clone());
    match err {
        ExmoError::Api(inner) if inner.code() == Some(error_codes::INSUFFICIENT_FUNDS) => {
            println!("Matched known insufficient funds error");
        }
        ExmoError::Transport { attempts, .. } => {
            println!("Gave up after {attempts} attempts");
        }
        _ => {
            println!("Unexpected error type");
        }
    }

    // Invalid input is rejected before anything is sent.
    match "limit".parse::<OrderType>() {
        Ok(order_type) => println!("Parsed {order_type}"),
        Err(err) => println!("{err}"),
    }
}
