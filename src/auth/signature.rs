//! HMAC-SHA512 signature generation for EXMO API authentication.
//!
//! EXMO authenticated endpoints require:
//! ```text
//! Sign = hex(HMAC-SHA512(urlencoded_body, api_secret))
//! ```
//!
//! The body must contain a `nonce` field, and the signed bytes must be
//! exactly the bytes that are transmitted.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::auth::{Credentials, NonceProvider};
use crate::error::ExmoError;
use crate::types::Params;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the public API key.
pub const KEY_HEADER: &str = "Key";
/// Header carrying the hex-encoded signature.
pub const SIGN_HEADER: &str = "Sign";

/// Sign an encoded request body.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `post_data` - The URL-encoded POST body, including the nonce
///
/// # Returns
///
/// Lowercase hex-encoded HMAC-SHA512 signature.
///
/// # Example
///
/// ```rust
/// use exmo_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("K-api_key", "S-api_secret");
/// let signature = sign_request(&credentials, "nonce=1234567890")?;
/// assert_eq!(signature.len(), 128);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(credentials: &Credentials, post_data: &str) -> Result<String, ExmoError> {
    let mut hmac = HmacSha512::new_from_slice(credentials.secret_bytes())
        .map_err(|e| ExmoError::config(format!("Invalid HMAC key: {e}")))?;
    hmac.update(post_data.as_bytes());
    Ok(hex::encode(hmac.finalize().into_bytes()))
}

/// Authentication headers produced for one signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Value of the `Key` header
    pub key: String,
    /// Value of the `Sign` header
    pub sign: String,
}

/// A parameter set with its nonce, encoding and signature.
#[derive(Debug, Clone)]
pub struct SignedParams {
    /// The parameters, with `nonce` set
    pub params: Params,
    /// The form-encoded parameters that were signed
    pub body: String,
    /// Headers to attach to the request
    pub headers: AuthHeaders,
}

/// Add a fresh nonce to `params`, encode them and sign the encoding.
///
/// An existing `nonce` parameter is overwritten in place; otherwise the
/// nonce is appended after the other parameters.
pub fn sign_params(
    mut params: Params,
    credentials: &Credentials,
    nonce_provider: &dyn NonceProvider,
) -> Result<SignedParams, ExmoError> {
    params.insert("nonce", nonce_provider.next_nonce());
    let body = params.encode()?;
    let sign = sign_request(credentials, &body)?;

    Ok(SignedParams {
        params,
        body,
        headers: AuthHeaders {
            key: credentials.api_key.clone(),
            sign,
        },
    })
}
