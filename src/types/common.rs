//! Common domain types for EXMO API.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExmoError;

/// Order type accepted by `order_create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Limit buy order
    Buy,
    /// Limit sell order
    Sell,
    /// Market buy of a quantity
    MarketBuy,
    /// Market sell of a quantity
    MarketSell,
    /// Market buy spending a total amount
    MarketBuyTotal,
    /// Market sell receiving a total amount
    MarketSellTotal,
}

impl OrderType {
    /// All order types, in API order.
    pub const ALL: [OrderType; 6] = [
        OrderType::Buy,
        OrderType::Sell,
        OrderType::MarketBuy,
        OrderType::MarketSell,
        OrderType::MarketBuyTotal,
        OrderType::MarketSellTotal,
    ];

    /// The wire name of the order type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Buy => "buy",
            OrderType::Sell => "sell",
            OrderType::MarketBuy => "market_buy",
            OrderType::MarketSell => "market_sell",
            OrderType::MarketBuyTotal => "market_buy_total",
            OrderType::MarketSellTotal => "market_sell_total",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ExmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let possible = OrderType::ALL
                    .iter()
                    .map(OrderType::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                ExmoError::config(format!(
                    "The order type `{s}` is invalid. Possible types: {possible}"
                ))
            })
    }
}

/// Conversion into an [`OrderType`], validating string input.
pub trait IntoOrderType {
    /// Convert, failing with a configuration error on unknown names.
    fn into_order_type(self) -> Result<OrderType, ExmoError>;
}

impl IntoOrderType for OrderType {
    fn into_order_type(self) -> Result<OrderType, ExmoError> {
        Ok(self)
    }
}

impl IntoOrderType for &str {
    fn into_order_type(self) -> Result<OrderType, ExmoError> {
        self.parse()
    }
}

impl IntoOrderType for String {
    fn into_order_type(self) -> Result<OrderType, ExmoError> {
        self.parse()
    }
}

/// HTTP method used to call an endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    /// Parameters are sent as the query string
    Get,
    /// Parameters are sent as the form-encoded body
    #[default]
    Post,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

impl FromStr for Method {
    type Err = ExmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            _ => Err(ExmoError::config(
                "The request method must be 'get' or 'post'",
            )),
        }
    }
}
