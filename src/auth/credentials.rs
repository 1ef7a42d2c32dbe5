//! Credential management for EXMO API authentication.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::error::ExmoError;

/// Default environment variable holding the public API key.
pub const API_KEY_VAR: &str = "EXMO_API_KEY";
/// Default environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "EXMO_API_SECRET";

/// API credentials containing the key and secret.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier, sent in the `Key` header)
    pub api_key: String,
    /// The API secret (private, used as the HMAC key)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Get the API secret bytes used to key the signature.
    ///
    /// This method exposes the secret - use carefully.
    pub fn secret_bytes(&self) -> &[u8] {
        self.api_secret.expose_secret().as_bytes()
    }

    /// Whether both the key and the secret are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.expose_secret().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `EXMO_API_KEY` and `EXMO_API_SECRET`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from the default environment variables.
    pub fn from_env() -> Result<Self, ExmoError> {
        Self::from_env_vars(API_KEY_VAR, API_SECRET_VAR)
    }

    /// Create credentials from custom environment variable names.
    pub fn from_env_vars(key_var: &str, secret_var: &str) -> Result<Self, ExmoError> {
        let read = |var: &str| {
            std::env::var(var)
                .map_err(|_| ExmoError::config(format!("Environment variable {var} not set")))
        };
        let api_key = read(key_var)?;
        let api_secret = read(secret_var)?;

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret),
        })
    }

    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
