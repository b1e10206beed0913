//! Invoice provider client (BTCPay Server Greenfield API).
//!
//! Endpoints used:
//!
//! ```text
//! GET {base}/stores/{storeId}/invoices
//! GET {base}/stores/{storeId}/invoices/{invoiceId}/payment-methods
//! GET {base}/stores/{storeId}/rates?currencyPair=XMR_USD&currencyPair=BTC_USD
//! ```
//!
//! All requests carry `Authorization: token {apiKey}`.

use crate::api_client::{join_segments, parse_base_url, ApiClient};
use crate::config::BtcPayConfig;
use crate::error::{require_non_empty, IngestionError, Provider};
use crate::types::{Invoice, PaymentMethod, Rate};
use crate::InvoiceSource;
use url::Url;

/// Production [`InvoiceSource`] backed by the Greenfield REST API.
///
/// # Example
///
/// ```rust,no_run
/// use fund_ingestion::{BtcPayClient, BtcPayConfig, InvoiceSource};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = BtcPayConfig::new("https://pay.example.org/api/v1", "api-key");
///     let client = BtcPayClient::new(&config)?;
///
///     let invoices = client.fetch_invoices("store-id").await?;
///     println!("Got {} invoices", invoices.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BtcPayClient {
    api: ApiClient,
    base_url: Url,
    authorization: String,
}

impl BtcPayClient {
    /// Create a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::InvalidInput`] if the base URL is empty or
    /// unparsable, or the API key is empty.
    pub fn new(config: &BtcPayConfig) -> Result<Self, IngestionError> {
        let base_url = parse_base_url(Provider::BtcPay, &config.base_url)?;
        require_non_empty("btcpay api key", &config.api_key)?;

        Ok(Self {
            api: ApiClient::new(Provider::BtcPay, config.timeout)?,
            base_url,
            authorization: format!("token {}", config.api_key),
        })
    }

    fn invoices_url(&self, store_id: &str) -> Url {
        join_segments(&self.base_url, &["stores", store_id, "invoices"])
    }

    fn payment_methods_url(&self, store_id: &str, invoice_id: &str) -> Url {
        join_segments(
            &self.base_url,
            &["stores", store_id, "invoices", invoice_id, "payment-methods"],
        )
    }

    fn rates_url(&self, store_id: &str, currency_pairs: &[String]) -> Url {
        let mut url = join_segments(&self.base_url, &["stores", store_id, "rates"]);
        {
            let mut query = url.query_pairs_mut();
            for pair in currency_pairs {
                query.append_pair("currencyPair", pair);
            }
        }
        url
    }
}

impl InvoiceSource for BtcPayClient {
    async fn fetch_invoices(&self, store_id: &str) -> Result<Vec<Invoice>, IngestionError> {
        require_non_empty("store id", store_id)?;

        let invoices: Vec<Invoice> = self
            .api
            .get_json(self.invoices_url(store_id), &self.authorization)
            .await?;

        tracing::debug!("Fetched {} invoices for store {}", invoices.len(), store_id);
        Ok(invoices)
    }

    async fn fetch_payment_methods(
        &self,
        store_id: &str,
        invoice_id: &str,
    ) -> Result<Vec<PaymentMethod>, IngestionError> {
        require_non_empty("store id", store_id)?;
        require_non_empty("invoice id", invoice_id)?;

        self.api
            .get_json(self.payment_methods_url(store_id, invoice_id), &self.authorization)
            .await
    }

    async fn fetch_rates(
        &self,
        store_id: &str,
        currency_pairs: &[String],
    ) -> Result<Vec<Rate>, IngestionError> {
        require_non_empty("store id", store_id)?;
        if currency_pairs.is_empty() {
            return Ok(Vec::new());
        }

        self.api
            .get_json(self.rates_url(store_id, currency_pairs), &self.authorization)
            .await
    }
}
