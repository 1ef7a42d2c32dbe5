//! Authentication module for EXMO API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - HMAC-SHA512 signature generation for authenticated requests

mod credentials;
mod nonce;
mod signature;

pub use credentials::{
    API_KEY_VAR, API_SECRET_VAR, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use nonce::{MillisecondNonce, NonceProvider, current_time_millis};
pub use signature::{
    AuthHeaders, KEY_HEADER, SIGN_HEADER, SignedParams, sign_params, sign_request,
};
