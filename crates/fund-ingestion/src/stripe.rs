//! Card provider client (Stripe REST API).
//!
//! Only the charge list is read:
//!
//! ```text
//! GET {base}/charges   ->   { "data": [Charge], "has_more": bool }
//! ```
//!
//! Requests carry `Authorization: Bearer {secretKey}`. A single page is
//! fetched per call; when the provider reports `has_more` we log it rather
//! than follow the cursor.

use crate::api_client::{join_segments, parse_base_url, ApiClient};
use crate::config::StripeConfig;
use crate::error::{require_non_empty, IngestionError, Provider};
use crate::types::{Charge, ChargeList};
use crate::ChargeSource;
use url::Url;

/// Production [`ChargeSource`] backed by the Stripe charges endpoint.
#[derive(Debug, Clone)]
pub struct StripeClient {
    api: ApiClient,
    charges_url: Url,
    authorization: String,
}

impl StripeClient {
    /// Create a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::InvalidInput`] if the secret key is empty or
    /// the base URL is unusable.
    pub fn new(config: &StripeConfig) -> Result<Self, IngestionError> {
        let base_url = parse_base_url(Provider::Stripe, &config.base_url)?;
        require_non_empty("stripe secret key", &config.secret_key)?;

        Ok(Self {
            api: ApiClient::new(Provider::Stripe, config.timeout)?,
            charges_url: join_segments(&base_url, &["charges"]),
            authorization: format!("Bearer {}", config.secret_key),
        })
    }

    /// Full URL of the charge list endpoint.
    pub fn charges_url(&self) -> &Url {
        &self.charges_url
    }
}

impl ChargeSource for StripeClient {
    async fn fetch_charges(&self) -> Result<Vec<Charge>, IngestionError> {
        let list: ChargeList = self
            .api
            .get_json(self.charges_url.clone(), &self.authorization)
            .await?;

        if list.has_more {
            tracing::warn!(
                "Card provider returned {} charges and reports more; only the first page is counted",
                list.data.len()
            );
        }

        tracing::debug!("Fetched {} charges", list.data.len());
        Ok(list.data)
    }
}
