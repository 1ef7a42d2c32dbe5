//! Example: Authentication helpers and signing.
//!
//! Run with: cargo run --example auth_credentials

use exmo_api_client::auth::{
    Credentials, CredentialsProvider, EnvCredentials, MillisecondNonce, NonceProvider,
    StaticCredentials, sign_params, sign_request,
};
use exmo_api_client::types::Params;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Static credentials (typically used in tests or explicit config).
    let static_creds = StaticCredentials::new("K-api_key", "S-api_secret");
    println!("Static key: {}", static_creds.get_credentials().api_key);

    // Environment credentials are convenient for local dev.
    if let Some(env_creds) = EnvCredentials::try_from_env() {
        println!(
            "Loaded env credentials: {}",
            env_creds.get_credentials().api_key
        );
    } else {
        println!("Set EXMO_API_KEY and EXMO_API_SECRET to load env credentials.");
    }

    // Nonce generation for authenticated requests.
    let nonce = MillisecondNonce::new();
    println!("Next nonces: {} {}", nonce.next_nonce(), nonce.next_nonce());

    // Signing a raw body.
    let creds = Credentials::new("K-api_key", "S-api_secret");
    let signature = sign_request(&creds, "nonce=1234567890")?;
    println!("Signature: {signature}");

    // Signing a parameter set: adds the nonce, encodes and signs.
    let params = Params::new().with("pair", "BTC_USD").with("limit", 100);
    let signed = sign_params(params, &creds, &nonce)?;
    println!("Body: {}", signed.body);
    println!("Key: {}, Sign: {}", signed.headers.key, signed.headers.sign);

    Ok(())
}
