//! # For4Payments
//!
//! Default and fallback gateway. The raw secret is the `Authorization`
//! header and amounts are integer centavos.

use crate::config::ProviderConfig;
use crate::http::{is_valid_transaction_id, ProviderHttp};
use async_trait::async_trait;
use pix_core::{
    normalize_request, parse_payment_record, GatewayClient, GatewayIdentity, GatewayResult,
    NormalizedPayment, PaymentRecord, PaymentRequest, PlaceholderGenerator, ResponseFields,
    StatusRecord,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

const FIELDS: ResponseFields = ResponseFields::STANDARD;

/// For4Payments adapter
pub struct For4Gateway {
    http: ProviderHttp,
    placeholders: PlaceholderGenerator,
}

impl For4Gateway {
    pub fn new(config: ProviderConfig, placeholders: PlaceholderGenerator) -> GatewayResult<Self> {
        Ok(Self {
            http: ProviderHttp::new(config)?,
            placeholders,
        })
    }

    fn build_payload(payment: &NormalizedPayment) -> For4PurchaseBody<'_> {
        let cents = payment.amount.cents();
        For4PurchaseBody {
            name: &payment.name,
            email: &payment.email,
            cpf: payment.cpf.as_deref(),
            phone: &payment.phone,
            payment_method: "PIX",
            amount: cents,
            traceable: true,
            items: vec![For4Item {
                title: &payment.description,
                unit_price: cents,
                quantity: 1,
                tangible: false,
                external_id: payment.product_id.as_deref(),
            }],
        }
    }
}

#[async_trait]
impl GatewayClient for For4Gateway {
    #[instrument(skip(self, request), fields(gateway = "FOR4"))]
    async fn create_payment(&self, request: PaymentRequest) -> GatewayResult<PaymentRecord> {
        let payment = normalize_request(&request, &self.placeholders)?;
        info!("Creating For4 payment of {}", payment.amount.display());

        let body = self
            .http
            .create("/transaction.purchase", &Self::build_payload(&payment))
            .await?;

        let record = parse_payment_record(GatewayIdentity::For4, &body, &FIELDS)?;
        info!("For4 payment created: id={}, status={}", record.id, record.status);
        Ok(record)
    }

    #[instrument(skip(self), fields(gateway = "FOR4"))]
    async fn check_status(&self, transaction_id: &str) -> StatusRecord {
        if !is_valid_transaction_id(transaction_id) {
            warn!("Refusing status check for transaction id {:?}", transaction_id);
            return StatusRecord::pending();
        }
        self.http
            .status("/transaction.getPayment", &[("id", transaction_id)], &FIELDS)
            .await
    }

    fn identity(&self) -> GatewayIdentity {
        GatewayIdentity::For4
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct For4PurchaseBody<'a> {
    name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpf: Option<&'a str>,
    phone: &'a str,
    payment_method: &'static str,
    amount: i64,
    traceable: bool,
    items: Vec<For4Item<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct For4Item<'a> {
    title: &'a str,
    unit_price: i64,
    quantity: u32,
    tangible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_id: Option<&'a str>,
}
