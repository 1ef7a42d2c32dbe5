//! Error types for the EXMO client library.

use thiserror::Error;

/// The main error type for all EXMO client operations.
#[derive(Error, Debug)]
pub enum ExmoError {
    /// Invalid client or request configuration, detected before any network call
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request could not be delivered within the attempt budget
    #[error("Transport error after {attempts} attempt(s): {source}")]
    Transport {
        /// Number of attempts made before giving up
        attempts: u32,
        /// The failure of the last attempt
        #[source]
        source: reqwest_middleware::Error,
    },

    /// EXMO API returned an error payload
    #[error("{0}")]
    Api(ApiError),

    /// Reading the HTTP response failed after the request was delivered
    #[error("HTTP response failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ExmoError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a transport error.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Get the API error, if the server rejected the request.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// An error reported by EXMO in the `error` field of a response.
///
/// EXMO messages usually look like `Error 50054: Insufficient funds`.
/// The message is kept verbatim; the numeric code is extracted when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    message: String,
    code: Option<u32>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create an API error from the server's message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let code = parse_code(&message);
        Self { message, code }
    }

    /// Build an API error from the raw `error` field of a response.
    ///
    /// Non-string values are rendered as JSON.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::new(s.clone()),
            other => Self::new(other.to_string()),
        }
    }

    /// The message exactly as returned by the server.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The numeric error code, if the message carries one.
    pub fn code(&self) -> Option<u32> {
        self.code
    }

    /// Check if this is an insufficient funds error.
    pub fn is_insufficient_funds(&self) -> bool {
        self.code == Some(error_codes::INSUFFICIENT_FUNDS)
    }

    /// Check if this is an unknown order error.
    pub fn is_order_not_found(&self) -> bool {
        matches!(
            self.code,
            Some(error_codes::ORDER_NOT_FOUND | error_codes::ORDER_TRADES_NOT_FOUND)
        )
    }

    /// Check if the API key is not allowed to call the method.
    pub fn is_method_not_allowed(&self) -> bool {
        self.code == Some(error_codes::API_METHOD_NOT_ALLOWED)
    }

    /// Check if this is an unknown withdrawal task error.
    pub fn is_withdrawal_task_not_found(&self) -> bool {
        self.code == Some(error_codes::WITHDRAWAL_TASK_NOT_FOUND)
    }
}

fn parse_code(message: &str) -> Option<u32> {
    let rest = message.strip_prefix("Error ")?;
    let (code, _) = rest.split_once(':')?;
    code.trim().parse().ok()
}

/// Known EXMO error codes for pattern matching.
pub mod error_codes {
    /// Insufficient funds to place the order.
    pub const INSUFFICIENT_FUNDS: u32 = 50054;
    /// Order to cancel was not found.
    pub const ORDER_NOT_FOUND: u32 = 50173;
    /// Order whose trades were requested was not found.
    pub const ORDER_TRADES_NOT_FOUND: u32 = 50304;
    /// The API key has no permission for the method.
    pub const API_METHOD_NOT_ALLOWED: u32 = 10519;
    /// Withdrawal task was not found.
    pub const WITHDRAWAL_TASK_NOT_FOUND: u32 = 10193;
}
