//! Gatehouse configuration.
//!
//! Configuration is loaded from environment variables. The OIDC client
//! secret is held as a [`SecretString`] so Debug output never exposes it.

use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Gatehouse configuration.
///
/// Loaded from environment variables. The provider is addressed either by
/// `OIDC_DOMAIN` (composed into `https://<domain>/oidc/`) or by an explicit
/// `OIDC_BASE_URL` override, which test environments use to point at a
/// local mock provider.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// OAuth2 client id used for introspection calls.
    pub oidc_client_id: String,

    /// OAuth2 client secret used for introspection calls.
    pub oidc_client_secret: SecretString,

    /// Provider domain, composed into `https://<domain>/oidc/`.
    pub oidc_domain: Option<String>,

    /// Explicit provider base URL. Takes precedence over `oidc_domain`.
    pub oidc_base_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Environment variable {0} must not be blank")]
    BlankValue(String),

    #[error("OIDC provider domain does not compose into a valid base URL: {0}")]
    InvalidProviderUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let oidc_client_id = vars
            .get("OIDC_CLIENT_ID")
            .ok_or_else(|| ConfigError::MissingEnvVar("OIDC_CLIENT_ID".to_string()))?
            .clone();

        let oidc_client_secret = vars
            .get("OIDC_CLIENT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("OIDC_CLIENT_SECRET".to_string()))?
            .clone();

        let oidc_domain = vars.get("OIDC_DOMAIN").cloned();
        let oidc_base_url = vars.get("OIDC_BASE_URL").cloned();

        if oidc_domain.is_none() && oidc_base_url.is_none() {
            return Err(ConfigError::MissingEnvVar("OIDC_DOMAIN".to_string()));
        }

        Ok(Config {
            bind_address,
            oidc_client_id,
            oidc_client_secret: SecretString::from(oidc_client_secret),
            oidc_domain,
            oidc_base_url,
        })
    }
}
