//! # pix-gateway
//!
//! PIX charge service in front of the NOVAERA, FOR4 and 4M gateways.
//!
//! ## Usage
//!
//! ```bash
//! export GATEWAY_CHOICE=NOVAERA
//! export NOVAERA_PAYMENTS_SECRET_KEY=...
//! export FOR4PAYMENTS_SECRET_KEY=...
//!
//! pix-gateway
//! ```

use pix_api::{routes, state::AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Select the gateway and build application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment gateway: {}", state.gateway.identity());
    if let Some(requested) = state.gateway.selection.fell_back_from {
        warn!(
            "Requested gateway {} unavailable, serving with {}",
            requested,
            state.gateway.identity()
        );
    }

    // Create router
    let app = routes::create_router(state);

    info!("pix-gateway listening on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Charge: POST http://{}/api/v1/payments", addr);
        info!("Status: GET http://{}/api/v1/payments/{{id}}/status", addr);
    }

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  PIX Gateway
  -----------
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
