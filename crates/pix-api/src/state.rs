//! # Application State
//!
//! Shared state for the Axum application: the selected gateway and the
//! server configuration.

use anyhow::Context;
use pix_core::{BoxedGatewayClient, GatewayConfig, SelectedGateway};
use pix_gateways::build_gateway;
use std::net::SocketAddr;

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Gateway chosen at startup; configuration is read-only afterwards
    pub gateway: SelectedGateway,
    /// Server config
    pub config: AppConfig,
}

impl AppState {
    /// Select and build the gateway from environment configuration
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let gateway_config = GatewayConfig::from_env()?;
        let gateway = build_gateway(&gateway_config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize payment gateway: {}", e))?;

        Ok(Self { gateway, config })
    }

    /// State around an already-built gateway
    pub fn with_gateway(gateway: SelectedGateway, config: AppConfig) -> Self {
        Self { gateway, config }
    }

    /// The active client
    pub fn client(&self) -> &BoxedGatewayClient {
        self.gateway.client()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
        assert!(!config.is_production());
    }

    #[test]
    fn test_invalid_socket_addr() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
