//! # Request Handlers
//!
//! Axum request handlers for the PIX payment API.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pix_core::{CustomerProfile, GatewayError, PaymentRecord, PaymentRequest, StatusRecord};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Fixed-fee payment request
#[derive(Debug, Deserialize)]
pub struct FixedFeeRequest {
    /// Customer data (name and CPF required)
    #[serde(flatten)]
    pub customer: CustomerProfile,
    /// Apply the discounted tariff
    #[serde(default)]
    pub has_discount: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn gateway_error_to_response(err: GatewayError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "pix-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "gateway": state.gateway.identity(),
        "fallback": state.gateway.selection.is_fallback(),
    }))
}

/// Create a PIX charge
#[instrument(skip(state, request), fields(gateway = %state.gateway.identity()))]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentRecord>, ApiError> {
    let record = state.client().create_payment(request).await.map_err(|e| {
        error!("Failed to create payment: {}", e);
        gateway_error_to_response(e)
    })?;

    info!("Created payment: {}", record.id);
    Ok(Json(record))
}

/// Create a PIX charge for the fixed tariff
#[instrument(skip(state, request), fields(gateway = %state.gateway.identity(), has_discount = request.has_discount))]
pub async fn create_fixed_fee_payment(
    State(state): State<AppState>,
    Json(request): Json<FixedFeeRequest>,
) -> Result<Json<PaymentRecord>, ApiError> {
    let record = state
        .client()
        .create_fixed_fee_payment(request.customer, request.has_discount)
        .await
        .map_err(|e| {
            error!("Failed to create fixed-fee payment: {}", e);
            gateway_error_to_response(e)
        })?;

    Ok(Json(record))
}

/// Poll a charge. Always 200: unknown or unreachable charges read as pending.
#[instrument(skip(state), fields(gateway = %state.gateway.identity()))]
pub async fn payment_status(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Json<StatusRecord> {
    Json(state.client().check_status(&transaction_id).await)
}
