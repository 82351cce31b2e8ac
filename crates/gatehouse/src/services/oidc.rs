//! OIDC provider HTTP client.
//!
//! Wraps the two remote calls Gatehouse makes against the provider: token
//! introspection (authenticated with the configured client credentials)
//! and user-profile lookup (the caller's token forwarded as a bearer).
//!
//! Both are leaf calls with no retry: any transport failure, non-200
//! status, or unparseable body is logged server-side and degrades to
//! `None`, which the resolver treats the same as "not active". An
//! unreachable provider therefore costs availability for cold tokens, not
//! correctness.

use crate::config::{Config, ConfigError};
use crate::models::{IntrospectionResponse, ProfileResponse};
use async_trait::async_trait;
use common::secret::{ExposeSecret, SecretString};
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{instrument, warn};

/// Request timeout for provider calls in seconds.
const PROVIDER_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Connect timeout for provider calls in seconds.
const PROVIDER_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Remote identity API surface.
///
/// A trait so the resolver can be exercised against scripted
/// implementations in tests.
#[async_trait]
pub trait IdentityApi: Send + Sync + 'static {
    /// Introspect `token`. `None` means the call failed or returned
    /// anything but a parseable 200; callers treat that as "not active".
    async fn introspect(&self, token: &str) -> Option<IntrospectionResponse>;

    /// Fetch the user profile for `token`. Best-effort; `None` tolerated.
    async fn fetch_profile(&self, token: &str) -> Option<ProfileResponse>;
}

/// HTTP client for the configured OIDC provider.
pub struct OidcClient {
    /// HTTP client with configured timeouts.
    client: Client,

    /// `{base}/token/introspection`, precomposed at construction.
    introspection_url: Url,

    /// `{base}/me`, precomposed at construction.
    profile_url: Url,

    /// Client credentials sent with introspection calls.
    client_id: String,
    client_secret: SecretString,
}

impl OidcClient {
    /// Build a client from configuration.
    ///
    /// Fails fast (a configuration error, not a runtime error) when the
    /// client id, client secret, or provider domain is blank, or
    /// when the domain does not compose into a valid
    /// `https://<domain>/oidc/` base URL.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        if config.oidc_client_id.trim().is_empty() {
            return Err(ConfigError::BlankValue("OIDC_CLIENT_ID".to_string()));
        }
        if config.oidc_client_secret.expose_secret().trim().is_empty() {
            return Err(ConfigError::BlankValue("OIDC_CLIENT_SECRET".to_string()));
        }

        let base_url = Self::base_url(config)?;
        let introspection_url = base_url
            .join("token/introspection")
            .map_err(|e| ConfigError::InvalidProviderUrl(e.to_string()))?;
        let profile_url = base_url
            .join("me")
            .map_err(|e| ConfigError::InvalidProviderUrl(e.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(PROVIDER_REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(PROVIDER_CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            introspection_url,
            profile_url,
            client_id: config.oidc_client_id.clone(),
            client_secret: config.oidc_client_secret.clone(),
        })
    }

    /// Compose the provider base URL, normalized to end with `/` so path
    /// joins append rather than replace.
    fn base_url(config: &Config) -> Result<Url, ConfigError> {
        let raw = match (&config.oidc_base_url, &config.oidc_domain) {
            (Some(base_url), _) => {
                if base_url.trim().is_empty() {
                    return Err(ConfigError::BlankValue("OIDC_BASE_URL".to_string()));
                }
                let mut raw = base_url.trim().to_string();
                if !raw.ends_with('/') {
                    raw.push('/');
                }
                raw
            }
            (None, Some(domain)) => {
                if domain.trim().is_empty() {
                    return Err(ConfigError::BlankValue("OIDC_DOMAIN".to_string()));
                }
                format!("https://{}/oidc/", domain.trim())
            }
            (None, None) => {
                return Err(ConfigError::BlankValue("OIDC_DOMAIN".to_string()));
            }
        };

        Url::parse(&raw).map_err(|_| ConfigError::InvalidProviderUrl(raw))
    }
}

#[async_trait]
impl IdentityApi for OidcClient {
    /// Introspect the given token.
    #[instrument(skip_all, name = "gate.services.oidc.introspect")]
    async fn introspect(&self, token: &str) -> Option<IntrospectionResponse> {
        if token.trim().is_empty() {
            return None;
        }

        let form = [
            ("token", token),
            ("token_type_hint", "access_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
        ];

        let response = match self
            .client
            .post(self.introspection_url.clone())
            .form(&form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(target: "gate.services.oidc", error = %e, "Introspection request failed");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            warn!(
                target: "gate.services.oidc",
                status = %response.status(),
                "Introspection endpoint returned non-OK status"
            );
            return None;
        }

        match response.json::<IntrospectionResponse>().await {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(target: "gate.services.oidc", error = %e, "Failed to parse introspection response");
                None
            }
        }
    }

    /// Get the user profile for the given token from the `me` endpoint.
    #[instrument(skip_all, name = "gate.services.oidc.profile")]
    async fn fetch_profile(&self, token: &str) -> Option<ProfileResponse> {
        if token.trim().is_empty() {
            return None;
        }

        let response = match self
            .client
            .get(self.profile_url.clone())
            .bearer_auth(token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(target: "gate.services.oidc", error = %e, "Profile request failed");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            warn!(
                target: "gate.services.oidc",
                status = %response.status(),
                "Profile endpoint returned non-OK status"
            );
            return None;
        }

        match response.json::<ProfileResponse>().await {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(target: "gate.services.oidc", error = %e, "Failed to parse profile response");
                None
            }
        }
    }
}
