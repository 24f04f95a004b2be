//! # Payment Types
//!
//! Caller-facing request and result shapes, stable across every gateway.

use crate::error::{GatewayError, GatewayResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Description used when the caller does not provide one
pub const DEFAULT_DESCRIPTION: &str = "Pagamento via PIX";

/// Fixed tariff with discount, in centavos (R$ 49,70)
pub const DISCOUNTED_FEE_CENTS: i64 = 4970;

/// Fixed tariff without discount, in centavos (R$ 93,40)
pub const FULL_FEE_CENTS: i64 = 9340;

/// Description attached to fixed-fee charges
pub const FIXED_FEE_DESCRIPTION: &str = "Taxa de inscrição";

/// Canonical payment status. Provider vocabularies never leak past this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    /// True once the charge can no longer change
    pub fn is_final(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest charge accepted, in centavos (R$ 10,000,000.00)
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000_000;

/// Amount in BRL, held in centavos
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Decimal reais (e.g. `93.4`)
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Two-decimal string (e.g. `"93.40"`)
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    }

    /// Format for display (e.g. `"R$ 93.40"`)
    pub fn display(&self) -> String {
        format!("R$ {}", self.to_decimal_string())
    }

    /// Validate and convert a caller-supplied amount.
    pub fn parse(raw: &RawAmount) -> GatewayResult<Self> {
        let value = match raw {
            RawAmount::Number(n) => *n,
            RawAmount::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                GatewayError::Validation(format!("Invalid payment amount: {}", s))
            })?,
        };

        if !value.is_finite() {
            return Err(GatewayError::Validation(format!(
                "Invalid payment amount: {}",
                value
            )));
        }

        let scaled = (value * 100.0).round();
        if scaled <= 0.0 {
            return Err(GatewayError::Validation(
                "Payment amount must be greater than zero".to_string(),
            ));
        }
        if scaled > MAX_AMOUNT_CENTS as f64 {
            return Err(GatewayError::Validation(format!(
                "Payment amount exceeds the maximum of {}",
                Self(MAX_AMOUNT_CENTS).display()
            )));
        }
        Ok(Self(scaled as i64))
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

/// Amount as the caller sent it: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        RawAmount::Text(value)
    }
}

impl From<Amount> for RawAmount {
    fn from(value: Amount) -> Self {
        RawAmount::Number(value.as_decimal())
    }
}

/// Request to create a PIX charge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Customer name (required)
    #[serde(default, alias = "customer_name")]
    pub name: String,

    #[serde(default, alias = "customer_email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, alias = "customer_phone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// National tax ID; formatting characters are tolerated
    #[serde(default, alias = "customer_cpf", skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,

    /// Amount in BRL (required, positive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<RawAmount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl PaymentRequest {
    pub fn new(name: impl Into<String>, amount: impl Into<RawAmount>) -> Self {
        Self {
            name: name.into(),
            amount: Some(amount.into()),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_cpf(mut self, cpf: impl Into<String>) -> Self {
        self.cpf = Some(cpf.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Validated amount; `Validation` when missing, non-numeric or non-positive
    pub fn amount(&self) -> GatewayResult<Amount> {
        match &self.amount {
            Some(raw) => Amount::parse(raw),
            None => Err(GatewayError::Validation(
                "Missing required fields: amount".to_string(),
            )),
        }
    }
}

/// Canonical result of creating a charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Provider transaction id
    pub id: String,
    /// PIX copy-and-paste code
    pub pix_code: Option<String>,
    /// QR image payload
    pub pix_qr_code: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: PaymentStatus,
}

/// Canonical result of a status check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status: PaymentStatus,
    /// Provider status string, upper-cased
    pub original_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_qr_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl StatusRecord {
    /// The record returned whenever a status check cannot be answered
    pub fn pending() -> Self {
        Self {
            status: PaymentStatus::Pending,
            original_status: "PENDING".to_string(),
            pix_code: None,
            pix_qr_code: None,
            transaction_id: None,
        }
    }
}

/// Customer data for the fixed-fee convenience operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CustomerProfile {
    pub fn new(name: impl Into<String>, cpf: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            cpf: Some(cpf.into()),
            email: None,
            phone: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Fixed tariff for this profile
    pub fn fixed_fee(has_discount: bool) -> Amount {
        if has_discount {
            Amount::from_cents(DISCOUNTED_FEE_CENTS)
        } else {
            Amount::from_cents(FULL_FEE_CENTS)
        }
    }

    /// Build the charge request for the fixed tariff.
    ///
    /// Name and CPF are required; email and phone are defaulted later by the
    /// gateway like any other request.
    pub fn fixed_fee_request(&self, has_discount: bool) -> GatewayResult<PaymentRequest> {
        let name = non_blank(&self.name)
            .ok_or_else(|| GatewayError::Validation("Customer name is required".to_string()))?;
        let cpf = non_blank(&self.cpf)
            .ok_or_else(|| GatewayError::Validation("Customer CPF is required".to_string()))?;

        Ok(PaymentRequest {
            name: name.to_string(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            cpf: Some(cpf.to_string()),
            amount: Some(Self::fixed_fee(has_discount).into()),
            description: Some(FIXED_FEE_DESCRIPTION.to_string()),
            product_id: None,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_parse_number_and_text() {
        assert_eq!(Amount::parse(&RawAmount::Number(49.7)).unwrap().cents(), 4970);
        let amount = Amount::parse(&"93.40".into()).unwrap();
        assert_eq!(amount.cents(), 9340);
        assert_eq!(amount.as_decimal(), 93.40);
        assert_eq!(amount.to_decimal_string(), "93.40");
        assert_eq!(amount.display(), "R$ 93.40");
    }

    #[test]
    fn test_amount_rejects_non_positive_and_garbage() {
        for raw in [
            RawAmount::Number(0.0),
            RawAmount::Number(-5.0),
            RawAmount::Number(f64::NAN),
            RawAmount::Text("abc".into()),
            RawAmount::Text("".into()),
            RawAmount::Text("-1".into()),
        ] {
            let err = Amount::parse(&raw).unwrap_err();
            assert!(matches!(err, GatewayError::Validation(_)), "{:?}", raw);
        }
    }

    #[test]
    fn test_amount_rejects_oversized_values() {
        for raw in [
            RawAmount::Text("1e300".into()),
            RawAmount::Number(f64::MAX),
            RawAmount::Number(10_000_000.01),
        ] {
            let err = Amount::parse(&raw).unwrap_err();
            assert!(matches!(err, GatewayError::Validation(_)), "{:?}", raw);
        }

        let ceiling = Amount::parse(&RawAmount::Number(10_000_000.0)).unwrap();
        assert_eq!(ceiling.cents(), MAX_AMOUNT_CENTS);
    }

    #[test]
    fn test_decimal_string_handles_sign() {
        assert_eq!(Amount::from_cents(-5).to_decimal_string(), "-0.05");
        assert_eq!(Amount::from_cents(-9340).to_decimal_string(), "-93.40");
        assert_eq!(Amount::from_cents(7).to_decimal_string(), "0.07");
    }

    #[test]
    fn test_missing_amount() {
        let request = PaymentRequest {
            name: "Ana".into(),
            ..Default::default()
        };
        assert!(matches!(request.amount(), Err(GatewayError::Validation(_))));
    }

    #[test]
    fn test_request_accepts_customer_aliases() {
        let request: PaymentRequest = serde_json::from_value(serde_json::json!({
            "customer_name": "Ana",
            "customer_cpf": "123.456.789-01",
            "amount": "93.40"
        }))
        .unwrap();

        assert_eq!(request.name, "Ana");
        assert_eq!(request.cpf.as_deref(), Some("123.456.789-01"));
        assert_eq!(request.amount().unwrap().cents(), 9340);
    }

    #[test]
    fn test_fixed_fee_amounts() {
        let profile = CustomerProfile::new("Ana", "12345678901");

        let discounted = profile.fixed_fee_request(true).unwrap();
        assert_eq!(discounted.amount().unwrap(), Amount::from_cents(4970));
        assert_eq!(discounted.amount().unwrap().as_decimal(), 49.70);

        let full = profile.fixed_fee_request(false).unwrap();
        assert_eq!(full.amount().unwrap().as_decimal(), 93.40);
        assert_eq!(full.description.as_deref(), Some(FIXED_FEE_DESCRIPTION));
        assert_eq!(full.cpf.as_deref(), Some("12345678901"));
    }

    #[test]
    fn test_fixed_fee_requires_name_and_cpf() {
        let no_cpf = CustomerProfile {
            name: Some("Ana".into()),
            ..Default::default()
        };
        assert!(matches!(
            no_cpf.fixed_fee_request(true),
            Err(GatewayError::Validation(_))
        ));

        let blank_name = CustomerProfile::new("  ", "12345678901");
        assert!(matches!(
            blank_name.fixed_fee_request(false),
            Err(GatewayError::Validation(_))
        ));
    }

    #[test]
    fn test_status_record_pending_shape() {
        let json = serde_json::to_value(StatusRecord::pending()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "pending", "original_status": "PENDING"})
        );
    }
}
