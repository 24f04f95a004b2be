//! # Gateway Configuration
//!
//! Explicit configuration snapshot handed to the selector and the factory.
//! Can be built in code, from environment variables, or from TOML.

use crate::error::{GatewayError, GatewayResult};
use crate::identity::GatewayIdentity;
use crate::redact::mask_secret;
use serde::Deserialize;

/// Default outbound request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Opaque provider secret. Never printed in full.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for building auth headers only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form safe for logs
    pub fn masked(&self) -> String {
        mask_secret(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential({})", self.masked())
    }
}

/// Which of the two observed precedence rules the selector applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// A QUATROM credential wins over any explicit choice
    #[default]
    CredentialPriority,
    /// The explicit choice wins; unknown choices are rejected
    ExplicitChoice,
}

impl SelectionPolicy {
    pub fn parse(value: &str) -> GatewayResult<Self> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "credential-priority" | "credential" => Ok(SelectionPolicy::CredentialPriority),
            "explicit-choice" | "explicit" => Ok(SelectionPolicy::ExplicitChoice),
            other => Err(GatewayError::Configuration(format!(
                "Unknown gateway selection policy: {}",
                other
            ))),
        }
    }
}

/// Per-provider settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSettings {
    /// Secret API key
    #[serde(default)]
    pub secret_key: Option<Credential>,
    /// Override of the provider's API base URL (sandbox, mocks)
    #[serde(default)]
    pub api_base_url: Option<String>,
}

impl ProviderSettings {
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret_key: Some(Credential::new(secret)),
            api_base_url: None,
        }
    }

    /// The credential, if one is present and not blank
    pub fn credential(&self) -> Option<&Credential> {
        self.secret_key.as_ref().filter(|c| !c.is_blank())
    }

    /// Builder: set custom API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }
}

/// Configuration snapshot for gateway selection and construction
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Raw gateway-choice string (`NOVAERA`, `FOR4`, `4M`, `QUATROM`, ...)
    #[serde(default)]
    pub choice: Option<String>,

    #[serde(default)]
    pub policy: SelectionPolicy,

    #[serde(default)]
    pub quatrom: ProviderSettings,

    #[serde(default)]
    pub for4: ProviderSettings,

    #[serde(default)]
    pub novaera: ProviderSettings,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            choice: None,
            policy: SelectionPolicy::default(),
            quatrom: ProviderSettings::default(),
            for4: ProviderSettings::default(),
            novaera: ProviderSettings::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Recognised vars:
    /// - `GATEWAY_CHOICE`, `GATEWAY_SELECTION_POLICY`, `GATEWAY_TIMEOUT_SECS`
    /// - `QUATROM_PAGAMENTOS_SECRET_KEY`, `FOR4PAYMENTS_SECRET_KEY`, `NOVAERA_PAYMENTS_SECRET_KEY`
    /// - `QUATROM_API_URL`, `FOR4_API_URL`, `NOVAERA_API_URL`
    pub fn from_env() -> GatewayResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` delegates here so tests
    /// never have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> GatewayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let policy = match non_empty("GATEWAY_SELECTION_POLICY") {
            Some(raw) => SelectionPolicy::parse(&raw)?,
            None => SelectionPolicy::default(),
        };

        let timeout_secs = match non_empty("GATEWAY_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                GatewayError::Configuration(format!(
                    "GATEWAY_TIMEOUT_SECS must be a whole number of seconds, got {}",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let provider = |secret_var: &str, url_var: &str| ProviderSettings {
            secret_key: non_empty(secret_var).map(Credential::new),
            api_base_url: non_empty(url_var),
        };

        let config = Self {
            choice: non_empty("GATEWAY_CHOICE"),
            policy,
            quatrom: provider("QUATROM_PAGAMENTOS_SECRET_KEY", "QUATROM_API_URL"),
            for4: provider("FOR4PAYMENTS_SECRET_KEY", "FOR4_API_URL"),
            novaera: provider("NOVAERA_PAYMENTS_SECRET_KEY", "NOVAERA_API_URL"),
            timeout_secs,
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> GatewayResult<Self> {
        let config: GatewayConfig = toml::from_str(content)
            .map_err(|e| GatewayError::Configuration(format!("Invalid gateway config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if self.timeout_secs == 0 {
            return Err(GatewayError::Configuration(
                "Gateway timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Settings for one provider
    pub fn provider(&self, gateway: GatewayIdentity) -> &ProviderSettings {
        match gateway {
            GatewayIdentity::QuatroM => &self.quatrom,
            GatewayIdentity::For4 => &self.for4,
            GatewayIdentity::NovaEra => &self.novaera,
        }
    }

    /// Credential for one provider, if configured
    pub fn credential(&self, gateway: GatewayIdentity) -> Option<&Credential> {
        self.provider(gateway).credential()
    }

    pub fn has_credential(&self, gateway: GatewayIdentity) -> bool {
        self.credential(gateway).is_some()
    }

    /// Builder: set the gateway choice
    pub fn with_choice(mut self, choice: impl Into<String>) -> Self {
        self.choice = Some(choice.into());
        self
    }

    /// Builder: set the selection policy
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builder: replace one provider's settings
    pub fn with_provider(mut self, gateway: GatewayIdentity, settings: ProviderSettings) -> Self {
        match gateway {
            GatewayIdentity::QuatroM => self.quatrom = settings,
            GatewayIdentity::For4 => self.for4 = settings,
            GatewayIdentity::NovaEra => self.novaera = settings,
        }
        self
    }

    /// Builder: set a provider's secret key
    pub fn with_secret(self, gateway: GatewayIdentity, secret: impl Into<String>) -> Self {
        let settings = ProviderSettings {
            secret_key: Some(Credential::new(secret)),
            ..self.provider(gateway).clone()
        };
        self.with_provider(gateway, settings)
    }
}
