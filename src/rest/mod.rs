//! EXMO REST API clients.
//!
//! A single [`Transport`] carries configuration, credentials and the nonce
//! provider. [`PublicClient`] and [`AuthenticatedClient`] are thin facades
//! over a shared transport:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use exmo_api_client::auth::EnvCredentials;
//! use exmo_api_client::rest::{AuthenticatedClient, PublicClient, Transport};
//!
//! # async fn run() -> Result<(), exmo_api_client::ExmoError> {
//! let transport = Arc::new(
//!     Transport::builder()
//!         .credentials(Arc::new(EnvCredentials::from_env()?))
//!         .connection_attempts(3)
//!         .build()?,
//! );
//! let public = PublicClient::from_transport(transport.clone());
//! let private = AuthenticatedClient::new(transport)?;
//!
//! let ticker = public.ticker().await?;
//! let orders = private.user_open_orders().await?;
//! # Ok(())
//! # }
//! ```

mod config;
pub mod endpoints;
mod private;
mod public;
mod transport;

pub use config::{
    CONNECTION_ATTEMPTS_PAUSE, ClientConfig, DEFAULT_CONNECTION_ATTEMPTS,
    MAX_CONNECTION_ATTEMPTS, ProxySettings, clamp_attempts,
};
pub use private::AuthenticatedClient;
pub use public::PublicClient;
pub use transport::{Transport, TransportBuilder};
