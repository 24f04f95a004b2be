//! # pix-gateways
//!
//! Concrete PIX provider adapters for pix-gateway-rs.
//!
//! | Adapter            | Provider          | Auth              | Amount format  |
//! |--------------------|-------------------|-------------------|----------------|
//! | `QuatroMGateway`   | 4M Pagamentos     | `Bearer <key>`    | `"93.40"`      |
//! | `For4Gateway`      | For4Payments      | `<key>`           | centavos       |
//! | `NovaEraGateway`   | NovaEra Pagamentos| `Basic <base64>`  | centavos       |
//!
//! All three apply the shared normalization contract from `pix-core`, so
//! callers see the same `PaymentRecord` / `StatusRecord` whichever one the
//! selector picked.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pix_core::{GatewayConfig, PaymentRequest};
//! use pix_gateways::build_gateway;
//!
//! let gateway = build_gateway(&GatewayConfig::from_env()?)?;
//! let record = gateway.client.create_payment(PaymentRequest::new("Ana", 93.40)).await?;
//!
//! // Show record.pix_code / record.pix_qr_code to the payer, then poll
//! let status = gateway.client.check_status(&record.id).await;
//! ```

pub mod config;
pub mod factory;
pub mod for4;
pub mod http;
pub mod novaera;
pub mod quatrom;

// Re-exports
pub use config::{AuthScheme, ProviderConfig};
pub use factory::{build_client, build_gateway, build_gateway_with_random};
pub use for4::For4Gateway;
pub use novaera::NovaEraGateway;
pub use quatrom::QuatroMGateway;
