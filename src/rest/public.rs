//! Public REST API endpoints (no authentication required).

use std::sync::Arc;

use crate::error::ExmoError;
use crate::rest::Transport;
use crate::rest::endpoints::{DEFAULT_ORDER_BOOK_LIMIT, MAX_ORDER_BOOK_LIMIT, public};
use crate::types::{Pairs, Params, Value};

/// Client for EXMO public market data.
///
/// # Example
///
/// ```rust,no_run
/// use exmo_api_client::rest::PublicClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PublicClient::new()?;
///     let trades = client.trades(["BTC_USD", "ETH_USD"]).await?;
///     println!("Last BTC_USD trade: {}", trades["BTC_USD"][0]);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PublicClient {
    transport: Arc<Transport>,
}

impl PublicClient {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self, ExmoError> {
        Ok(Self::from_transport(Arc::new(Transport::builder().build()?)))
    }

    /// Create a client on top of an existing transport.
    pub fn from_transport(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// Recent trades on one or more currency pairs.
    ///
    /// Each pair maps to a list of trades with `trade_id`, `type`, `price`,
    /// `quantity`, `amount` and `date`.
    pub async fn trades(&self, pairs: impl Into<Pairs>) -> Result<Value, ExmoError> {
        let pairs = pairs.into().require_non_empty()?;
        self.transport
            .query(public::TRADES, Params::new().with("pair", pairs))
            .await
    }

    /// Order book on one or more currency pairs.
    ///
    /// `limit` is the number of positions per side: 100 when `None`, capped
    /// at 1000.
    /// Each pair maps to `ask_quantity`, `ask_amount`, `ask_top`,
    /// `bid_quantity`, `bid_amount`, `bid_top`, and `ask`/`bid` lists of
    /// `[price, quantity, amount]`.
    pub async fn order_book(
        &self,
        pairs: impl Into<Pairs>,
        limit: Option<u32>,
    ) -> Result<Value, ExmoError> {
        let pairs = pairs.into().require_non_empty()?;
        let limit = limit.unwrap_or(DEFAULT_ORDER_BOOK_LIMIT).min(MAX_ORDER_BOOK_LIMIT);
        let params = Params::new().with("pair", pairs).with("limit", limit);
        self.transport.query(public::ORDER_BOOK, params).await
    }

    /// Price and volume statistics for every pair over the last 24 hours.
    pub async fn ticker(&self) -> Result<Value, ExmoError> {
        self.transport.query(public::TICKER, Params::new()).await
    }

    /// Order limits for every currency pair.
    pub async fn pair_settings(&self) -> Result<Value, ExmoError> {
        self.transport.query(public::PAIR_SETTINGS, Params::new()).await
    }

    /// List of currency codes.
    pub async fn currency(&self) -> Result<Value, ExmoError> {
        self.transport.query(public::CURRENCY, Params::new()).await
    }

    /// Check the connection with the API server.
    pub async fn ping(&self) -> bool {
        self.transport.ping().await
    }
}
