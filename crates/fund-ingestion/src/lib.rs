//! # fund-ingestion
//!
//! Read-only clients for the two payment providers a project's donations
//! come through.
//!
//! This crate provides [`InvoiceSource`] and [`ChargeSource`] trait
//! abstractions over the providers' REST APIs, with a clean, testable
//! interface.
//!
//! ## Design Principles
//!
//! - **Explicit configuration**: endpoints and credentials are handed to
//!   [`BtcPayClient::new`] / [`StripeClient::new`]; nothing is looked up from
//!   the process environment at call time.
//!
//! - **Thin wrapper**: one outbound GET per method call. No retries, no
//!   caching. Each call is bounded by the configured timeout.
//!
//! - **Testable**: [`MockInvoiceSource`] and [`MockChargeSource`] let the
//!   aggregation logic run without network calls.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fund_ingestion::{BtcPayClient, BtcPayConfig, InvoiceSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BtcPayClient::new(&BtcPayConfig::new(
//!         "https://pay.example.org/api/v1",
//!         "api-key",
//!     ))?;
//!
//!     for invoice in client.fetch_invoices("store-id").await? {
//!         let methods = client.fetch_payment_methods("store-id", &invoice.id).await?;
//!         println!("{}: {} payment methods", invoice.id, methods.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Testing with mocks
//!
//! ```rust
//! use fund_ingestion::{ChargeSource, MockChargeSource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockChargeSource::new();
//!     let charges = mock.fetch_charges().await.unwrap();
//!     assert!(charges.is_empty());
//! }
//! ```
//!
//! ## Errors
//!
//! Every failure maps onto [`IngestionError`]: `ProviderUnavailable` for
//! network errors, timeouts and non-2xx statuses, `MalformedResponse` for
//! bodies that don't decode, `InvalidInput` for empty identifiers or
//! credentials.

mod api_client;
mod btcpay;
pub mod config;
pub mod error;
pub mod mock;
mod stripe;
pub mod types;

pub use btcpay::BtcPayClient;
pub use config::{BtcPayConfig, StripeConfig};
pub use error::{IngestionError, Provider};
pub use mock::{MockChargeSource, MockInvoiceSource};
pub use stripe::StripeClient;
pub use types::{Charge, Invoice, PaymentMethod, Rate};

/// Invoice provider abstraction.
///
/// Uses native async syntax (Rust 1.75+) rather than `async_trait`, so
/// implementations are plain `async fn`s.
///
/// ## Implementors
///
/// - [`BtcPayClient`]: Production implementation over HTTP
/// - [`MockInvoiceSource`]: Test implementation with configurable responses
///
/// ## Why `Send + Sync`?
///
/// The aggregator issues several payment-method fetches concurrently and is
/// shared across request handlers, so sources must be usable from multiple
/// tasks.
pub trait InvoiceSource: Send + Sync {
    /// Fetch every invoice of a store.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::InvalidInput`] if `store_id` is empty.
    fn fetch_invoices(
        &self,
        store_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Invoice>, IngestionError>> + Send;

    /// Fetch the payment-method breakdown of one invoice.
    ///
    /// Entry order is whatever the provider returns and carries no meaning.
    fn fetch_payment_methods(
        &self,
        store_id: &str,
        invoice_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<PaymentMethod>, IngestionError>> + Send;

    /// Fetch current exchange rates for `BASE_QUOTE` currency pairs.
    fn fetch_rates(
        &self,
        store_id: &str,
        currency_pairs: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Rate>, IngestionError>> + Send;
}

/// Card provider abstraction.
///
/// ## Implementors
///
/// - [`StripeClient`]: Production implementation over HTTP
/// - [`MockChargeSource`]: Test implementation with configurable responses
pub trait ChargeSource: Send + Sync {
    /// Fetch the account's charges.
    fn fetch_charges(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Charge>, IngestionError>> + Send;
}
