//! # Routes
//!
//! Axum router configuration for the PIX payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
///   - GET  /health
///   - POST /api/v1/payments
///   - POST /api/v1/payments/fixed-fee
///   - GET  /api/v1/payments/{transaction_id}/status
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Payment routes
    let payment_routes = Router::new()
        .route("/", post(handlers::create_payment))
        .route("/fixed-fee", post(handlers::create_fixed_fee_payment))
        .route("/{transaction_id}/status", get(handlers::payment_status));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1/payments", payment_routes)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
