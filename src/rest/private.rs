//! Private REST API endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the transport.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::auth::StaticCredentials;
use crate::error::ExmoError;
use crate::rest::endpoints::{DEFAULT_USER_LIST_LIMIT, MAX_USER_LIST_LIMIT, private};
use crate::rest::{PublicClient, Transport};
use crate::types::{IntoOrderType, Pairs, Params, Value};

/// Client for EXMO account and trading endpoints.
///
/// Construction fails unless the transport carries a non-empty API key and
/// secret. Public endpoints stay reachable through [`AuthenticatedClient::public`].
///
/// # Example
///
/// ```rust,no_run
/// use exmo_api_client::rest::AuthenticatedClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AuthenticatedClient::with_credentials("K-...", "S-...")?;
///     let info = client.user_info().await?;
///     println!("Balances: {}", info["balances"]);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    public: PublicClient,
}

impl AuthenticatedClient {
    /// Create a client on top of a transport that has credentials.
    pub fn new(transport: Arc<Transport>) -> Result<Self, ExmoError> {
        if !transport.has_credentials() {
            return Err(ExmoError::config(
                "Parameters `api_key` and `api_secret` must be specified",
            ));
        }
        Ok(Self {
            public: PublicClient::from_transport(transport),
        })
    }

    /// Create a client with the default configuration and static credentials.
    pub fn with_credentials(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ExmoError> {
        let transport = Transport::builder()
            .credentials(Arc::new(StaticCredentials::new(api_key, api_secret)))
            .build()?;
        Self::new(Arc::new(transport))
    }

    /// The public endpoints, sharing this client's transport.
    pub fn public(&self) -> &PublicClient {
        &self.public
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Arc<Transport> {
        self.public.transport()
    }

    async fn query(&self, endpoint: &str, params: Params) -> Result<Value, ExmoError> {
        self.transport().query(endpoint, params).await
    }

    /// Account information: `uid`, `server_date`, `balances` and `reserved`.
    pub async fn user_info(&self) -> Result<Value, ExmoError> {
        self.query(private::USER_INFO, Params::new()).await
    }

    /// Create an order.
    ///
    /// `order_type` is an [`OrderType`](crate::types::OrderType) or its wire
    /// name; an unknown name fails before anything is sent. Returns
    /// `result` and `order_id`.
    pub async fn order_create(
        &self,
        pair: &str,
        quantity: Decimal,
        price: Decimal,
        order_type: impl IntoOrderType,
    ) -> Result<Value, ExmoError> {
        let order_type = order_type.into_order_type()?;
        if pair.trim().is_empty() {
            return Err(ExmoError::config("The `pair` argument must not be empty"));
        }
        let params = Params::new()
            .with("pair", pair)
            .with("quantity", quantity)
            .with("price", price)
            .with("type", order_type);
        self.query(private::ORDER_CREATE, params).await
    }

    /// Cancel an order.
    pub async fn order_cancel(&self, order_id: u64) -> Result<Value, ExmoError> {
        self.query(private::ORDER_CANCEL, Params::new().with("order_id", order_id))
            .await
    }

    /// Active orders, keyed by pair.
    pub async fn user_open_orders(&self) -> Result<Value, ExmoError> {
        self.query(private::USER_OPEN_ORDERS, Params::new()).await
    }

    /// Own trades on one or more pairs.
    ///
    /// `limit` is 100 when `None` and is capped at 10000.
    pub async fn user_trades(
        &self,
        pairs: impl Into<Pairs>,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Value, ExmoError> {
        let pairs = pairs.into().require_non_empty()?;
        let params = Params::new()
            .with("pair", pairs)
            .with("offset", offset)
            .with("limit", user_list_limit(limit));
        self.query(private::USER_TRADES, params).await
    }

    /// Cancelled orders.
    ///
    /// `limit` is 100 when `None` and is capped at 10000.
    pub async fn user_cancelled_orders(
        &self,
        offset: u32,
        limit: Option<u32>,
    ) -> Result<Value, ExmoError> {
        let params = Params::new()
            .with("offset", offset)
            .with("limit", user_list_limit(limit));
        self.query(private::USER_CANCELLED_ORDERS, params).await
    }

    /// Trades that filled an order, with incoming and outgoing totals.
    pub async fn order_trades(&self, order_id: u64) -> Result<Value, ExmoError> {
        self.query(private::ORDER_TRADES, Params::new().with("order_id", order_id))
            .await
    }

    /// Cost of buying `quantity` on `pair`: `quantity`, `amount`, `avg_price`.
    pub async fn required_amount(&self, pair: &str, quantity: Decimal) -> Result<Value, ExmoError> {
        let params = Params::new().with("pair", pair).with("quantity", quantity);
        self.query(private::REQUIRED_AMOUNT, params).await
    }

    /// Crypto deposit addresses, keyed by currency.
    pub async fn deposit_address(&self) -> Result<Value, ExmoError> {
        self.query(private::DEPOSIT_ADDRESS, Params::new()).await
    }

    /// Create a crypto withdrawal task. Returns `result` and `task_id`.
    pub async fn withdraw_crypt(
        &self,
        amount: Decimal,
        currency: &str,
        address: &str,
    ) -> Result<Value, ExmoError> {
        let params = Params::new()
            .with("amount", amount)
            .with("currency", currency)
            .with("address", address);
        self.query(private::WITHDRAW_CRYPT, params).await
    }

    /// Transaction id of a withdrawal task: `result`, `status`, `txid`.
    pub async fn withdraw_get_txid(&self, task_id: u64) -> Result<Value, ExmoError> {
        self.query(private::WITHDRAW_GET_TXID, Params::new().with("task_id", task_id))
            .await
    }
}

fn user_list_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_USER_LIST_LIMIT).min(MAX_USER_LIST_LIMIT)
}
