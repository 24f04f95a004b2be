//! # pix-api
//!
//! HTTP API layer for pix-gateway-rs.
//!
//! The gateway is selected once at startup from the environment and every
//! request is served by that single adapter.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check and active gateway |
//! | POST | `/api/v1/payments` | Create a PIX charge |
//! | POST | `/api/v1/payments/fixed-fee` | Create a fixed-tariff PIX charge |
//! | GET | `/api/v1/payments/{id}/status` | Poll a charge |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
