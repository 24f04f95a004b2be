//! # 4M Pagamentos
//!
//! Bearer-token API; amounts travel as decimal strings and responses may be
//! wrapped in a `data` envelope.

use crate::config::ProviderConfig;
use crate::http::ProviderHttp;
use async_trait::async_trait;
use pix_core::{
    normalize_request, parse_payment_record, GatewayClient, GatewayIdentity, GatewayResult,
    NormalizedPayment, PaymentRecord, PaymentRequest, PlaceholderGenerator, ResponseFields,
    StatusRecord,
};
use serde::Serialize;
use tracing::{info, instrument};

const FIELDS: ResponseFields = ResponseFields::STANDARD;

/// 4M Pagamentos adapter
pub struct QuatroMGateway {
    http: ProviderHttp,
    placeholders: PlaceholderGenerator,
}

impl QuatroMGateway {
    pub fn new(config: ProviderConfig, placeholders: PlaceholderGenerator) -> GatewayResult<Self> {
        Ok(Self {
            http: ProviderHttp::new(config)?,
            placeholders,
        })
    }

    fn build_payload(payment: &NormalizedPayment) -> QuatroMPaymentBody<'_> {
        QuatroMPaymentBody {
            amount: payment.amount.to_decimal_string(),
            customer_name: &payment.name,
            customer_email: &payment.email,
            customer_cpf: payment.cpf.as_deref(),
            customer_phone: &payment.phone,
            description: &payment.description,
            product_id: payment.product_id.as_deref(),
        }
    }
}

#[async_trait]
impl GatewayClient for QuatroMGateway {
    #[instrument(skip(self, request), fields(gateway = "QUATROM"))]
    async fn create_payment(&self, request: PaymentRequest) -> GatewayResult<PaymentRecord> {
        let payment = normalize_request(&request, &self.placeholders)?;
        info!("Creating 4M payment of {}", payment.amount.display());

        let body = self
            .http
            .create("/payments", &Self::build_payload(&payment))
            .await?;

        let record = parse_payment_record(GatewayIdentity::QuatroM, &body, &FIELDS)?;
        info!("4M payment created: id={}, status={}", record.id, record.status);
        Ok(record)
    }

    #[instrument(skip(self), fields(gateway = "QUATROM"))]
    async fn check_status(&self, transaction_id: &str) -> StatusRecord {
        self.http
            .resource_status("payments", transaction_id, &FIELDS)
            .await
    }

    fn identity(&self) -> GatewayIdentity {
        GatewayIdentity::QuatroM
    }
}

#[derive(Debug, Serialize)]
struct QuatroMPaymentBody<'a> {
    amount: String,
    customer_name: &'a str,
    customer_email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_cpf: Option<&'a str>,
    customer_phone: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<&'a str>,
}
