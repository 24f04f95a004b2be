//! # Provider Configuration
//!
//! Resolved, validated settings for one provider adapter.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pix_core::{Credential, GatewayConfig, GatewayError, GatewayIdentity, GatewayResult};
use reqwest::Url;
use tracing::{error, info};

/// Shortest secret any provider issues
pub const MIN_SECRET_LEN: usize = 10;

/// How the secret goes into the `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Bearer <key>`
    Bearer,
    /// `<key>`
    Raw,
    /// `Basic base64(<key>:x)`
    Basic,
}

/// Default API base URL for each provider
pub fn default_base_url(gateway: GatewayIdentity) -> &'static str {
    match gateway {
        GatewayIdentity::QuatroM => "https://app.4mpagamentos.com/api/v1",
        GatewayIdentity::For4 => "https://app.for4payments.com.br/api/v1",
        GatewayIdentity::NovaEra => "https://api.novaera-pagamentos.com/api/v1",
    }
}

/// Authorization scheme each provider expects
pub fn auth_scheme(gateway: GatewayIdentity) -> AuthScheme {
    match gateway {
        GatewayIdentity::QuatroM => AuthScheme::Bearer,
        GatewayIdentity::For4 => AuthScheme::Raw,
        GatewayIdentity::NovaEra => AuthScheme::Basic,
    }
}

/// Settings for a single provider adapter
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub gateway: GatewayIdentity,

    /// Secret API key
    pub secret_key: Credential,

    /// API base URL, without trailing slash
    pub api_base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Create config with explicit values
    pub fn new(gateway: GatewayIdentity, secret_key: impl Into<String>) -> GatewayResult<Self> {
        let config = Self {
            gateway,
            secret_key: Credential::new(secret_key),
            api_base_url: default_base_url(gateway).to_string(),
            timeout_secs: pix_core::DEFAULT_TIMEOUT_SECS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolve one provider's settings from the shared snapshot.
    ///
    /// Fails with `MissingCredential` when the provider has no key.
    pub fn from_gateway_config(
        gateway: GatewayIdentity,
        config: &GatewayConfig,
    ) -> GatewayResult<Self> {
        let settings = config.provider(gateway);
        let secret_key = settings.credential().cloned().ok_or_else(|| {
            error!("No credential configured for {}", gateway);
            GatewayError::MissingCredential { gateway }
        })?;

        let api_base_url = settings
            .api_base_url
            .as_deref()
            .unwrap_or(default_base_url(gateway))
            .trim_end_matches('/')
            .to_string();

        let resolved = Self {
            gateway,
            secret_key,
            api_base_url,
            timeout_secs: config.timeout_secs,
        };
        resolved.validate()?;
        Ok(resolved)
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if self.secret_key.is_blank() {
            return Err(GatewayError::MissingCredential {
                gateway: self.gateway,
            });
        }
        if self.secret_key.len() < MIN_SECRET_LEN {
            error!(
                "{} secret key too short ({} characters)",
                self.gateway,
                self.secret_key.len()
            );
            return Err(GatewayError::Configuration(format!(
                "{} secret key is invalid (too short)",
                self.gateway
            )));
        }
        info!(
            "Using {} key {} ({} characters)",
            self.gateway,
            self.secret_key.masked(),
            self.secret_key.len()
        );
        Ok(())
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        let secret = self.secret_key.expose();
        match auth_scheme(self.gateway) {
            AuthScheme::Bearer => format!("Bearer {}", secret),
            AuthScheme::Raw => secret.to_string(),
            AuthScheme::Basic => format!("Basic {}", BASE64.encode(format!("{}:x", secret))),
        }
    }

    /// Full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    /// URL of one resource in a collection. `id` is percent-encoded as a
    /// single path segment, so `/` or `..` inside it cannot escape the
    /// collection.
    pub fn resource_url(&self, collection: &str, id: &str) -> GatewayResult<Url> {
        let mut url = Url::parse(&self.api_base_url).map_err(|e| {
            GatewayError::Configuration(format!("{} base URL is invalid: {}", self.gateway, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::Configuration(format!("{} base URL cannot carry a path", self.gateway))
            })?
            .pop_if_empty()
            .push(collection)
            .push(id);
        Ok(url)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
