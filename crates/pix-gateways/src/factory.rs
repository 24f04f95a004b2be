//! # Gateway Factory
//!
//! Runs the selector and constructs the matching adapter.

use crate::config::ProviderConfig;
use crate::for4::For4Gateway;
use crate::novaera::NovaEraGateway;
use crate::quatrom::QuatroMGateway;
use pix_core::{
    select_gateway, BoxedGatewayClient, GatewayConfig, GatewayIdentity, GatewayResult,
    PlaceholderGenerator, RandomSource, SelectedGateway, ThreadRandom,
};
use std::sync::Arc;
use tracing::info;

/// Select and build the gateway for `config`, with the thread-local RNG
/// for placeholder data.
pub fn build_gateway(config: &GatewayConfig) -> GatewayResult<SelectedGateway> {
    build_gateway_with_random(config, Arc::new(ThreadRandom))
}

/// Select and build the gateway for `config` with an injected random source.
pub fn build_gateway_with_random(
    config: &GatewayConfig,
    random: Arc<dyn RandomSource>,
) -> GatewayResult<SelectedGateway> {
    let selection = select_gateway(config)?;
    let client = build_client(selection.identity, config, PlaceholderGenerator::new(random))?;

    match selection.fell_back_from {
        Some(requested) => info!(
            "Payment gateway: {} (fallback from {})",
            selection.identity, requested
        ),
        None => info!("Payment gateway: {}", selection.identity),
    }

    Ok(SelectedGateway::new(selection, client))
}

/// Construct a specific adapter, bypassing selection.
///
/// Fails with `MissingCredential` when the provider has no key.
pub fn build_client(
    gateway: GatewayIdentity,
    config: &GatewayConfig,
    placeholders: PlaceholderGenerator,
) -> GatewayResult<BoxedGatewayClient> {
    let provider = ProviderConfig::from_gateway_config(gateway, config)?;
    let client: BoxedGatewayClient = match gateway {
        GatewayIdentity::QuatroM => Arc::new(QuatroMGateway::new(provider, placeholders)?),
        GatewayIdentity::For4 => Arc::new(For4Gateway::new(provider, placeholders)?),
        GatewayIdentity::NovaEra => Arc::new(NovaEraGateway::new(provider, placeholders)?),
    };
    Ok(client)
}
