//! # EXMO Client
//!
//! An async Rust client library for the EXMO exchange REST API.
//!
//! ## Features
//!
//! - Public market data and authenticated trading endpoints
//! - HMAC-SHA512 request signing with strictly increasing nonces
//! - Retry with a fixed pause over transport failures; API errors are never retried
//! - Numeric strings in responses normalized into integers and floats
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exmo_api_client::rest::PublicClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PublicClient::new()?;
//!     let book = client.order_book("BTC_USD", Some(10)).await?;
//!     println!("Best ask: {}", book["BTC_USD"]["ask_top"]);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, ExmoError};
pub use rest::{AuthenticatedClient, PublicClient, Transport};
pub use types::{OrderType, Params, Value};

/// Result type alias using ExmoError
pub type Result<T> = std::result::Result<T, ExmoError>;
