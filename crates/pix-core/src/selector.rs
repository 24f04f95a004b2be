//! # Gateway Selector
//!
//! Pure decision function from a [`GatewayConfig`] snapshot to the gateway
//! that should serve this call. Side effects are limited to advisory logs.
//!
//! Two precedence rules exist and are chosen by [`SelectionPolicy`]:
//!
//! ```text
//! CredentialPriority                 ExplicitChoice
//! ──────────────────                 ──────────────
//! QUATROM key set  → QUATROM         choice (default FOR4)
//! choice NOVAERA   → NOVAERA           NOVAERA → NOVAERA
//! choice 4M/QUATROM→ FOR4 (warn)       FOR4    → FOR4
//! otherwise        → FOR4              4M/QUATROM → QUATROM if key, else FOR4 (warn)
//!                                      other   → ConfigurationError
//! ```
//!
//! Under both policies a NOVAERA pick without a NOVAERA key degrades to FOR4.

use crate::config::{GatewayConfig, SelectionPolicy};
use crate::error::{GatewayError, GatewayResult};
use crate::identity::GatewayIdentity;
use tracing::{info, warn};

/// Outcome of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewaySelection {
    /// Gateway that will serve the call
    pub identity: GatewayIdentity,
    /// The gateway the configuration asked for, when it differs from `identity`
    pub fell_back_from: Option<GatewayIdentity>,
}

impl GatewaySelection {
    fn direct(identity: GatewayIdentity) -> Self {
        Self {
            identity,
            fell_back_from: None,
        }
    }

    fn fallback(requested: GatewayIdentity) -> Self {
        Self {
            identity: GatewayIdentity::For4,
            fell_back_from: Some(requested),
        }
    }

    /// True when the requested gateway could not be honoured
    pub fn is_fallback(&self) -> bool {
        self.fell_back_from.is_some()
    }
}

/// Select the gateway for the given configuration.
pub fn select_gateway(config: &GatewayConfig) -> GatewayResult<GatewaySelection> {
    let selection = match config.policy {
        SelectionPolicy::CredentialPriority => credential_priority(config),
        SelectionPolicy::ExplicitChoice => explicit_choice(config)?,
    };
    Ok(degrade_novaera_without_key(config, selection))
}

fn credential_priority(config: &GatewayConfig) -> GatewaySelection {
    if config.has_credential(GatewayIdentity::QuatroM) {
        info!("QUATROM credential found; using QUATROM regardless of gateway choice");
        return GatewaySelection::direct(GatewayIdentity::QuatroM);
    }

    let choice = config.choice.as_deref().and_then(GatewayIdentity::from_choice);
    match choice {
        Some(GatewayIdentity::NovaEra) => GatewaySelection::direct(GatewayIdentity::NovaEra),
        Some(GatewayIdentity::QuatroM) => {
            warn!("Gateway choice is QUATROM but no QUATROM credential is configured; falling back to FOR4");
            GatewaySelection::fallback(GatewayIdentity::QuatroM)
        }
        _ => GatewaySelection::direct(GatewayIdentity::For4),
    }
}

fn explicit_choice(config: &GatewayConfig) -> GatewayResult<GatewaySelection> {
    let raw = config.choice.as_deref().unwrap_or(GatewayIdentity::For4.as_str());
    let choice = GatewayIdentity::from_choice(raw).ok_or_else(|| {
        GatewayError::Configuration(format!(
            "Invalid gateway choice '{}'; expected NOVAERA, FOR4, 4M or QUATROM",
            raw
        ))
    })?;

    Ok(match choice {
        GatewayIdentity::NovaEra => GatewaySelection::direct(GatewayIdentity::NovaEra),
        GatewayIdentity::For4 => GatewaySelection::direct(GatewayIdentity::For4),
        GatewayIdentity::QuatroM if config.has_credential(GatewayIdentity::QuatroM) => {
            GatewaySelection::direct(GatewayIdentity::QuatroM)
        }
        GatewayIdentity::QuatroM => {
            warn!("Gateway choice is QUATROM but no QUATROM credential is configured; falling back to FOR4");
            GatewaySelection::fallback(GatewayIdentity::QuatroM)
        }
    })
}

fn degrade_novaera_without_key(
    config: &GatewayConfig,
    selection: GatewaySelection,
) -> GatewaySelection {
    if selection.identity == GatewayIdentity::NovaEra
        && !config.has_credential(GatewayIdentity::NovaEra)
    {
        warn!("NOVAERA selected but no NOVAERA credential is configured; falling back to FOR4");
        return GatewaySelection::fallback(GatewayIdentity::NovaEra);
    }
    selection
}
