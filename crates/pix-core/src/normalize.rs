//! # Normalization Contract
//!
//! Shared by every adapter, in both directions:
//!
//! - **Outbound**: [`normalize_request`] validates a [`PaymentRequest`] and
//!   fills in placeholder email/phone, digit-only CPF and the default
//!   description.
//! - **Inbound**: [`parse_payment_record`] and [`parse_status_record`] turn
//!   arbitrary provider JSON (optionally wrapped in a `data` envelope) into
//!   the canonical records.

use crate::error::{GatewayError, GatewayResult};
use crate::identity::GatewayIdentity;
use crate::payment::{
    Amount, PaymentRecord, PaymentRequest, PaymentStatus, StatusRecord, DEFAULT_DESCRIPTION,
};
use crate::random::PlaceholderGenerator;
use crate::redact::mask_cpf;
use crate::status::map_status_with;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Expected CPF length, in digits
pub const CPF_DIGITS: usize = 11;

/// Minimum phone digit count accepted as-is
pub const MIN_PHONE_DIGITS: usize = 10;

/// A request ready to be mapped onto a provider payload
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPayment {
    pub name: String,
    pub email: String,
    /// Digits only
    pub phone: String,
    /// Digits only; `None` when the caller sent no CPF
    pub cpf: Option<String>,
    pub amount: Amount,
    pub description: String,
    pub product_id: Option<String>,
}

/// Validate a request and apply the defaulting rules.
pub fn normalize_request(
    request: &PaymentRequest,
    placeholders: &PlaceholderGenerator,
) -> GatewayResult<NormalizedPayment> {
    let name = request.name.trim();

    let mut missing = Vec::new();
    if name.is_empty() {
        missing.push("name");
    }
    if request.amount.is_none() {
        missing.push("amount");
    }
    if !missing.is_empty() {
        warn!("Missing required payment fields: {:?}", missing);
        return Err(GatewayError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let amount = request.amount().map_err(|e| {
        warn!("Rejected payment amount: {}", e);
        e
    })?;

    let cpf = request
        .cpf
        .as_deref()
        .map(digits_only)
        .filter(|digits| !digits.is_empty());
    if let Some(ref digits) = cpf {
        if digits.len() == CPF_DIGITS {
            debug!("CPF accepted: {}", mask_cpf(digits));
        } else {
            warn!(
                "CPF has unexpected length {} ({}); forwarding as-is",
                digits.len(),
                mask_cpf(digits)
            );
        }
    }

    let email = match request.email.as_deref().map(str::trim) {
        Some(email) if email.contains('@') => email.to_string(),
        _ => {
            let generated = placeholders.email(name);
            info!("Generated placeholder email: {}", generated);
            generated
        }
    };

    let phone = match request.phone.as_deref().map(digits_only) {
        Some(digits) if digits.len() >= MIN_PHONE_DIGITS => digits,
        _ => {
            let generated = placeholders.phone();
            info!("Generated placeholder phone: {}", generated);
            generated
        }
    };

    let description = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string();

    Ok(NormalizedPayment {
        name: name.to_string(),
        email,
        phone,
        cpf,
        amount,
        description,
        product_id: request.product_id.clone(),
    })
}

/// Strip everything that is not an ASCII digit
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Where to look for each canonical field in a provider body.
///
/// Paths are dotted (`pix.qrcode`) and tried in order; the first hit wins.
#[derive(Debug, Clone, Copy)]
pub struct ResponseFields {
    pub transaction_id: &'static [&'static str],
    pub pix_code: &'static [&'static str],
    pub pix_qr_code: &'static [&'static str],
    pub expires_at: &'static [&'static str],
    pub status: &'static [&'static str],
    /// Provider-specific status aliases consulted after the base table
    pub status_aliases: &'static [(&'static str, PaymentStatus)],
}

impl ResponseFields {
    /// Snake and camel case variants of the canonical keys
    pub const STANDARD: ResponseFields = ResponseFields {
        transaction_id: &["transaction_id", "transactionId", "id"],
        pix_code: &["pix_code", "pixCode"],
        pix_qr_code: &["pix_qr_code", "pixQrCode"],
        expires_at: &["expires_at", "expiresAt"],
        status: &["status"],
        status_aliases: &[],
    };
}

impl Default for ResponseFields {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The payload itself, looking through a `data` object envelope if present
pub fn unwrap_envelope(body: &Value) -> &Value {
    match body.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => body,
    }
}

/// Build a [`PaymentRecord`] from a successful create response.
pub fn parse_payment_record(
    gateway: GatewayIdentity,
    body: &Value,
    fields: &ResponseFields,
) -> GatewayResult<PaymentRecord> {
    let payload = unwrap_envelope(body);

    let id = lookup_string(payload, fields.transaction_id).ok_or_else(|| {
        GatewayError::upstream(gateway, "Malformed response: missing transaction id")
    })?;

    let status = lookup_string(payload, fields.status)
        .or_else(|| lookup_string(body, fields.status))
        .map(|raw| map_status_with(&raw, fields.status_aliases))
        .unwrap_or(PaymentStatus::Pending);

    let expires_at = lookup(payload, fields.expires_at).and_then(parse_expiration);

    Ok(PaymentRecord {
        id,
        pix_code: lookup_string(payload, fields.pix_code),
        pix_qr_code: lookup_string(payload, fields.pix_qr_code),
        expires_at,
        status,
    })
}

/// Build a [`StatusRecord`] from a successful status response. Never fails.
pub fn parse_status_record(body: &Value, fields: &ResponseFields) -> StatusRecord {
    let payload = unwrap_envelope(body);

    let original_status = lookup_string(payload, fields.status)
        .or_else(|| lookup_string(body, fields.status))
        .map(|raw| raw.trim().to_ascii_uppercase())
        .filter(|raw| !raw.is_empty())
        .unwrap_or_else(|| "PENDING".to_string());

    StatusRecord {
        status: map_status_with(&original_status, fields.status_aliases),
        original_status,
        pix_code: lookup_string(payload, fields.pix_code),
        pix_qr_code: lookup_string(payload, fields.pix_qr_code),
        transaction_id: lookup_string(payload, fields.transaction_id),
    }
}

/// Best-effort human message from a provider error body
pub fn provider_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;

    for key in ["message", "error"] {
        if let Some(message) = obj.get(key).and_then(Value::as_str) {
            if !message.trim().is_empty() {
                return Some(message.to_string());
            }
        }
    }

    let errors: Vec<String> = obj
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(|e| match e {
            Value::String(s) => Some(s.clone()),
            Value::Object(o) => o.get("message").and_then(Value::as_str).map(String::from),
            _ => None,
        })
        .collect();

    if errors.is_empty() {
        None
    } else {
        Some(errors.join("; "))
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (taken as UTC) and Unix
/// timestamps in seconds or milliseconds.
pub fn parse_expiration(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(naive.and_utc());
            }
            if let Ok(secs) = s.parse::<i64>() {
                return from_unix(secs);
            }
            debug!("Ignoring unparseable expiration: {}", s);
            None
        }
        Value::Number(n) => n.as_i64().and_then(from_unix),
        _ => None,
    }
}

fn from_unix(value: i64) -> Option<DateTime<Utc>> {
    if value > 100_000_000_000 {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

fn lookup<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|path| {
        path.split('.')
            .try_fold(value, |node, key| node.get(key))
            .filter(|v| !v.is_null())
    })
}

fn lookup_string(value: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| {
        let node = lookup(value, std::slice::from_ref(path))?;
        match node {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    })
}
