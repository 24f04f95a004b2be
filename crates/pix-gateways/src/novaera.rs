//! # NovaEra Pagamentos
//!
//! Basic-auth API with a nested customer document and PIX details under a
//! `pix` object. Uses its own lower-case status vocabulary on top of the
//! shared table.

use crate::config::ProviderConfig;
use crate::http::ProviderHttp;
use async_trait::async_trait;
use pix_core::{
    normalize_request, parse_payment_record, GatewayClient, GatewayIdentity, GatewayResult,
    NormalizedPayment, PaymentRecord, PaymentRequest, PaymentStatus, PlaceholderGenerator,
    ResponseFields, StatusRecord,
};
use serde::Serialize;
use tracing::{info, instrument};

const FIELDS: ResponseFields = ResponseFields {
    transaction_id: &["id", "transaction_id", "transactionId"],
    pix_code: &["pix.qrcode", "pix_code", "pixCode"],
    pix_qr_code: &["pix.qrcodeImage", "pix.qr_code_image", "pix_qr_code", "pixQrCode"],
    expires_at: &["pix.expirationDate", "expires_at", "expiresAt"],
    status: &["status"],
    status_aliases: &[
        ("WAITING_PAYMENT", PaymentStatus::Pending),
        ("REFUSED", PaymentStatus::Failed),
        ("REFUNDED", PaymentStatus::Cancelled),
    ],
};

/// Days a NovaEra PIX charge stays payable
const PIX_EXPIRES_IN_DAYS: u32 = 1;

/// NovaEra Pagamentos adapter
pub struct NovaEraGateway {
    http: ProviderHttp,
    placeholders: PlaceholderGenerator,
}

impl NovaEraGateway {
    pub fn new(config: ProviderConfig, placeholders: PlaceholderGenerator) -> GatewayResult<Self> {
        Ok(Self {
            http: ProviderHttp::new(config)?,
            placeholders,
        })
    }

    fn build_payload(payment: &NormalizedPayment) -> NovaEraTransactionBody<'_> {
        let cents = payment.amount.cents();
        NovaEraTransactionBody {
            amount: cents,
            payment_method: "pix",
            customer: NovaEraCustomer {
                name: &payment.name,
                email: &payment.email,
                phone: &payment.phone,
                document: payment.cpf.as_deref().map(|number| NovaEraDocument {
                    kind: "cpf",
                    number,
                }),
            },
            items: vec![NovaEraItem {
                title: &payment.description,
                unit_price: cents,
                quantity: 1,
                tangible: false,
                external_ref: payment.product_id.as_deref(),
            }],
            pix: NovaEraPix {
                expires_in_days: PIX_EXPIRES_IN_DAYS,
            },
        }
    }
}

#[async_trait]
impl GatewayClient for NovaEraGateway {
    #[instrument(skip(self, request), fields(gateway = "NOVAERA"))]
    async fn create_payment(&self, request: PaymentRequest) -> GatewayResult<PaymentRecord> {
        let payment = normalize_request(&request, &self.placeholders)?;
        info!("Creating NovaEra payment of {}", payment.amount.display());

        let body = self
            .http
            .create("/transactions", &Self::build_payload(&payment))
            .await?;

        let record = parse_payment_record(GatewayIdentity::NovaEra, &body, &FIELDS)?;
        info!("NovaEra payment created: id={}, status={}", record.id, record.status);
        Ok(record)
    }

    #[instrument(skip(self), fields(gateway = "NOVAERA"))]
    async fn check_status(&self, transaction_id: &str) -> StatusRecord {
        self.http
            .resource_status("transactions", transaction_id, &FIELDS)
            .await
    }

    fn identity(&self) -> GatewayIdentity {
        GatewayIdentity::NovaEra
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NovaEraTransactionBody<'a> {
    amount: i64,
    payment_method: &'static str,
    customer: NovaEraCustomer<'a>,
    items: Vec<NovaEraItem<'a>>,
    pix: NovaEraPix,
}

#[derive(Debug, Serialize)]
struct NovaEraCustomer<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<NovaEraDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct NovaEraDocument<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    number: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NovaEraItem<'a> {
    title: &'a str,
    unit_price: i64,
    quantity: u32,
    tangible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_ref: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NovaEraPix {
    expires_in_days: u32,
}
