//! Common types used across the EXMO client library.

pub mod common;
mod normalize;
mod params;
mod value;

pub use common::*;
pub use normalize::normalize;
pub use params::{Pairs, Params};
pub use value::{Map, Value};
