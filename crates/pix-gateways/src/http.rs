//! # Provider HTTP Plumbing
//!
//! One reqwest client per adapter, plus the two exchange shapes every
//! provider shares: a create call that classifies failures into the error
//! taxonomy, and a status call that degrades every failure to pending.

use crate::config::ProviderConfig;
use pix_core::normalize::provider_error_message;
use pix_core::{
    parse_status_record, GatewayError, GatewayIdentity, GatewayResult, ResponseFields,
    StatusRecord,
};
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Authenticated JSON client for one provider
pub struct ProviderHttp {
    config: ProviderConfig,
    client: Client,
}

impl ProviderHttp {
    pub fn new(config: ProviderConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                GatewayError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn gateway(&self) -> GatewayIdentity {
        self.config.gateway
    }

    /// POST a charge-creation payload and return the parsed success body.
    ///
    /// 200/201 → body; 401 → `Auth`; anything else, transport failures and
    /// non-JSON bodies → `Upstream`.
    pub async fn create<P: Serialize + ?Sized>(&self, path: &str, payload: &P) -> GatewayResult<Value> {
        let url = self.config.url(path);
        info!("POST {} ({})", url, self.gateway());

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Connection error talking to {}: {}", self.gateway(), e);
                GatewayError::upstream(
                    self.gateway(),
                    format!("Could not reach payment provider: {}", e),
                )
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            GatewayError::upstream(self.gateway(), format!("Failed to read response: {}", e))
        })?;

        info!("{} responded with {}", self.gateway(), status);
        debug!("Response body: {}", body);

        match status {
            StatusCode::OK | StatusCode::CREATED => serde_json::from_str(&body).map_err(|e| {
                error!("Unparseable {} response: {}", self.gateway(), e);
                GatewayError::upstream(self.gateway(), format!("Malformed response: {}", e))
            }),
            StatusCode::UNAUTHORIZED => {
                error!(
                    "{} rejected our credentials (key {})",
                    self.gateway(),
                    self.config.secret_key.masked()
                );
                Err(GatewayError::Auth {
                    gateway: self.gateway(),
                })
            }
            _ => {
                let message = provider_error_message(&body)
                    .unwrap_or_else(|| format!("Payment processing failed (HTTP {})", status.as_u16()));
                error!("{} API error: {}", self.gateway(), message);
                Err(GatewayError::upstream(self.gateway(), message))
            }
        }
    }

    /// GET a status endpoint addressed by path and query. Never fails:
    /// 404, other errors, transport failures and unparseable bodies all
    /// yield a pending record.
    pub async fn status(
        &self,
        path: &str,
        query: &[(&str, &str)],
        fields: &ResponseFields,
    ) -> StatusRecord {
        match Url::parse(&self.config.url(path)) {
            Ok(url) => self.fetch_status(url, query, fields).await,
            Err(e) => {
                error!("Invalid status URL for {}: {}", self.gateway(), e);
                StatusRecord::pending()
            }
        }
    }

    /// GET `{collection}/{transaction_id}`. The id stays inside one path
    /// segment; blank, `.` and `..` ids are answered as pending without a
    /// request.
    pub async fn resource_status(
        &self,
        collection: &str,
        transaction_id: &str,
        fields: &ResponseFields,
    ) -> StatusRecord {
        if !is_valid_transaction_id(transaction_id) {
            warn!("Refusing status check for transaction id {:?}", transaction_id);
            return StatusRecord::pending();
        }

        match self.config.resource_url(collection, transaction_id) {
            Ok(url) => self.fetch_status(url, &[], fields).await,
            Err(e) => {
                error!("Cannot build status URL for {}: {}", self.gateway(), e);
                StatusRecord::pending()
            }
        }
    }

    async fn fetch_status(
        &self,
        url: Url,
        query: &[(&str, &str)],
        fields: &ResponseFields,
    ) -> StatusRecord {
        debug!("GET {} ({})", url, self.gateway());

        let response = match self
            .client
            .get(url.clone())
            .header("Authorization", self.config.auth_header())
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Error checking status on {}: {}", self.gateway(), e);
                return StatusRecord::pending();
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("Payment not found on {}: {}", self.gateway(), url);
            return StatusRecord::pending();
        }
        if !status.is_success() {
            error!(
                "Failed to fetch payment status from {} (HTTP {})",
                self.gateway(),
                status.as_u16()
            );
            return StatusRecord::pending();
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                error!("Unparseable status response from {}: {}", self.gateway(), e);
                return StatusRecord::pending();
            }
        };

        let record = parse_status_record(&body, fields);
        info!(
            "{} status: {} -> {}",
            self.gateway(),
            record.original_status,
            record.status
        );
        record
    }
}

/// Whether a caller-supplied transaction id may be sent to a provider
pub fn is_valid_transaction_id(transaction_id: &str) -> bool {
    let id = transaction_id.trim();
    !id.is_empty() && id != "." && id != ".."
}
