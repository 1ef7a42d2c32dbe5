//! EXMO REST API endpoint constants.

/// Base URL for the EXMO REST API.
pub const EXMO_BASE_URL: &str = "https://api.exmo.com";

/// API version path segment used by default.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Public endpoints (no authentication required).
pub mod public {
    /// Recent trades on currency pairs.
    pub const TRADES: &str = "trades";
    /// Order book on currency pairs.
    pub const ORDER_BOOK: &str = "order_book";
    /// Price and volume statistics.
    pub const TICKER: &str = "ticker";
    /// Currency pair settings.
    pub const PAIR_SETTINGS: &str = "pair_settings";
    /// Currency list.
    pub const CURRENCY: &str = "currency";
}

/// Private endpoints (authentication required).
pub mod private {
    /// Account information and balances.
    pub const USER_INFO: &str = "user_info";
    /// Create an order.
    pub const ORDER_CREATE: &str = "order_create";
    /// Cancel an order.
    pub const ORDER_CANCEL: &str = "order_cancel";
    /// Active orders.
    pub const USER_OPEN_ORDERS: &str = "user_open_orders";
    /// Own trades.
    pub const USER_TRADES: &str = "user_trades";
    /// Cancelled orders.
    pub const USER_CANCELLED_ORDERS: &str = "user_cancelled_orders";
    /// Trades of one order.
    pub const ORDER_TRADES: &str = "order_trades";
    /// Cost of buying a quantity.
    pub const REQUIRED_AMOUNT: &str = "required_amount";
    /// Crypto deposit addresses.
    pub const DEPOSIT_ADDRESS: &str = "deposit_address";
    /// Create a crypto withdrawal task.
    pub const WITHDRAW_CRYPT: &str = "withdraw_crypt";
    /// Transaction id of a withdrawal task.
    pub const WITHDRAW_GET_TXID: &str = "withdraw_get_txid";
}

/// Maximum number of order book positions.
pub const MAX_ORDER_BOOK_LIMIT: u32 = 1000;
/// Order book positions returned by default.
pub const DEFAULT_ORDER_BOOK_LIMIT: u32 = 100;
/// Maximum number of entries in user trade and order listings.
pub const MAX_USER_LIST_LIMIT: u32 = 10_000;
/// Entries returned by default in user trade and order listings.
pub const DEFAULT_USER_LIST_LIMIT: u32 = 100;
