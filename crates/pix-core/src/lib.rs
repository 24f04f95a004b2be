//! # pix-core
//!
//! Core types and decisions for the pix-gateway payment layer.
//!
//! This crate provides:
//! - `GatewayClient` trait implemented once per PIX provider
//! - `select_gateway` and `SelectionPolicy` for choosing a provider
//! - `GatewayConfig` as the explicit configuration snapshot
//! - `PaymentRequest`, `PaymentRecord` and `StatusRecord` canonical shapes
//! - The normalization contract shared by every adapter
//! - `GatewayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pix_core::{GatewayConfig, PaymentRequest, select_gateway};
//!
//! let config = GatewayConfig::from_env()?;
//! let selection = select_gateway(&config)?;
//!
//! // Build the concrete client (see pix-gateways)
//! let gateway = pix_gateways::build_gateway(&config)?;
//!
//! let record = gateway
//!     .client
//!     .create_payment(PaymentRequest::new("Ana", "93.40"))
//!     .await?;
//! let status = gateway.client.check_status(&record.id).await;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod normalize;
pub mod payment;
pub mod random;
pub mod redact;
pub mod selector;
pub mod status;

// Re-exports for convenience
pub use client::{BoxedGatewayClient, GatewayClient, SelectedGateway};
pub use config::{Credential, GatewayConfig, ProviderSettings, SelectionPolicy, DEFAULT_TIMEOUT_SECS};
pub use error::{GatewayError, GatewayResult};
pub use identity::GatewayIdentity;
pub use normalize::{
    normalize_request, parse_payment_record, parse_status_record, NormalizedPayment,
    ResponseFields,
};
pub use payment::{
    Amount, CustomerProfile, PaymentRecord, PaymentRequest, PaymentStatus, RawAmount,
    StatusRecord,
};
pub use random::{PlaceholderGenerator, RandomSource, ScriptedRandom, ThreadRandom};
pub use selector::{select_gateway, GatewaySelection};
pub use status::map_status;
