//! # Gateway Identity
//!
//! The three interchangeable PIX providers this workspace can drive.

use serde::{Deserialize, Serialize};

/// Which provider a client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GatewayIdentity {
    #[serde(rename = "NOVAERA")]
    NovaEra,
    #[serde(rename = "FOR4")]
    For4,
    #[serde(rename = "QUATROM", alias = "4M")]
    QuatroM,
}

impl GatewayIdentity {
    /// All gateways, in no particular priority order
    pub const ALL: [GatewayIdentity; 3] = [
        GatewayIdentity::NovaEra,
        GatewayIdentity::For4,
        GatewayIdentity::QuatroM,
    ];

    /// Canonical upper-case name, as used in `GATEWAY_CHOICE`
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayIdentity::NovaEra => "NOVAERA",
            GatewayIdentity::For4 => "FOR4",
            GatewayIdentity::QuatroM => "QUATROM",
        }
    }

    /// Parse a gateway-choice string. Case-insensitive, surrounding
    /// whitespace ignored, `4M` accepted for QUATROM.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim().to_ascii_uppercase().as_str() {
            "NOVAERA" => Some(GatewayIdentity::NovaEra),
            "FOR4" => Some(GatewayIdentity::For4),
            "QUATROM" | "4M" => Some(GatewayIdentity::QuatroM),
            _ => None,
        }
    }
}

impl std::fmt::Display for GatewayIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
