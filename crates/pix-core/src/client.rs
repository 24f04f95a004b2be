//! # Gateway Client Trait
//!
//! Capability contract every PIX provider adapter satisfies.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  GatewayClient (trait)                      │
//! │  ├── create_payment()                                       │
//! │  ├── check_status()           (never fails)                 │
//! │  ├── create_fixed_fee_payment()   (provided)                │
//! │  └── identity()                                             │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!          ┌─────────────────┼─────────────────┐
//!          │                 │                 │
//!  ┌───────┴───────┐ ┌───────┴───────┐ ┌───────┴───────┐
//!  │ QuatroMGateway│ │  For4Gateway  │ │ NovaEraGateway│
//!  └───────────────┘ └───────────────┘ └───────────────┘
//! ```

use crate::error::GatewayResult;
use crate::identity::GatewayIdentity;
use crate::payment::{CustomerProfile, PaymentRecord, PaymentRequest, StatusRecord};
use crate::selector::GatewaySelection;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Uniform operations over a PIX provider.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Create a PIX charge.
    ///
    /// # Errors
    /// - `Validation` when name or amount is missing, non-numeric or non-positive
    /// - `Auth` when the provider rejects our credentials
    /// - `Upstream` for any other provider or network failure
    async fn create_payment(&self, request: PaymentRequest) -> GatewayResult<PaymentRecord>;

    /// Poll a charge. Unknown transactions and provider failures come back
    /// as a pending record so polling loops can simply retry.
    async fn check_status(&self, transaction_id: &str) -> StatusRecord;

    /// Which provider this client talks to
    fn identity(&self) -> GatewayIdentity;

    /// Charge the fixed tariff (49.70 discounted, 93.40 otherwise).
    ///
    /// Requires name and CPF on the profile.
    async fn create_fixed_fee_payment(
        &self,
        profile: CustomerProfile,
        has_discount: bool,
    ) -> GatewayResult<PaymentRecord> {
        let request = profile.fixed_fee_request(has_discount).map_err(|e| {
            error!("Fixed-fee payment rejected: {}", e);
            e
        })?;

        info!(
            gateway = %self.identity(),
            has_discount,
            "Creating fixed-fee payment of {}",
            CustomerProfile::fixed_fee(has_discount).display()
        );

        let record = self.create_payment(request).await?;
        info!("Fixed-fee payment created: id={}", record.id);
        Ok(record)
    }
}

/// Type alias for a shared gateway client (dynamic dispatch)
pub type BoxedGatewayClient = Arc<dyn GatewayClient>;

/// A constructed client together with how it was chosen
#[derive(Clone)]
pub struct SelectedGateway {
    pub selection: GatewaySelection,
    pub client: BoxedGatewayClient,
}

impl SelectedGateway {
    pub fn new(selection: GatewaySelection, client: BoxedGatewayClient) -> Self {
        Self { selection, client }
    }

    pub fn identity(&self) -> GatewayIdentity {
        self.client.identity()
    }

    pub fn client(&self) -> &BoxedGatewayClient {
        &self.client
    }
}

impl std::fmt::Debug for SelectedGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedGateway")
            .field("selection", &self.selection)
            .field("identity", &self.identity())
            .finish()
    }
}
