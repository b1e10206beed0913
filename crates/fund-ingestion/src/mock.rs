//! Mock data sources for testing.
//!
//! `MockInvoiceSource` and `MockChargeSource` implement the source traits
//! with configurable responses, allowing tests to run without network calls.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fund_ingestion::{InvoiceSource, MockInvoiceSource};
//!
//! let mock = MockInvoiceSource::new()
//!     .with_invoice(invoice, vec![/* payment methods */]);
//!
//! let invoices = mock.fetch_invoices("store").await?;
//! ```

use crate::error::{IngestionError, Provider};
use crate::types::{Charge, ChargeMetadata, Invoice, InvoiceMetadata, PaymentMethod, Rate};
use crate::{ChargeSource, InvoiceSource};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mock invoice provider.
///
/// Unknown invoice ids behave like the real provider's 404: the
/// payment-method fetch fails with [`IngestionError::ProviderUnavailable`].
///
/// Call counters are shared between clones, so a test can keep a clone
/// around to inspect after handing the mock to an aggregator.
#[derive(Debug, Default, Clone)]
pub struct MockInvoiceSource {
    /// Invoices returned by `fetch_invoices`, in order.
    pub invoices: Vec<Invoice>,

    /// Payment methods per invoice id.
    pub payment_methods: HashMap<String, Vec<PaymentMethod>>,

    /// Rates returned by `fetch_rates` (filtered to the requested pairs).
    pub rates: Vec<Rate>,

    /// If set, `fetch_invoices` fails with this cause.
    pub invoices_failure: Option<String>,

    /// Invoice ids whose payment-method fetch fails.
    pub failing_invoices: HashSet<String>,

    /// Artificial latency added to each payment-method fetch.
    pub latency: Option<Duration>,

    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    payment_method_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockInvoiceSource {
    /// Create a new empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an invoice together with its payment methods (builder pattern).
    pub fn with_invoice(mut self, invoice: Invoice, methods: Vec<PaymentMethod>) -> Self {
        self.payment_methods.insert(invoice.id.clone(), methods);
        self.invoices.push(invoice);
        self
    }

    /// Set the rates to return (builder pattern).
    pub fn with_rates(mut self, rates: Vec<Rate>) -> Self {
        self.rates = rates;
        self
    }

    /// Make the invoice list call fail.
    pub fn with_invoices_failure(mut self, cause: impl Into<String>) -> Self {
        self.invoices_failure = Some(cause.into());
        self
    }

    /// Make the payment-method call for one invoice fail.
    pub fn with_failing_invoice(mut self, invoice_id: impl Into<String>) -> Self {
        self.failing_invoices.insert(invoice_id.into());
        self
    }

    /// Delay each payment-method fetch.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of payment-method fetches started so far.
    pub fn payment_method_calls(&self) -> usize {
        self.counters.payment_method_calls.load(Ordering::SeqCst)
    }

    /// Highest number of payment-method fetches observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }
}

impl InvoiceSource for MockInvoiceSource {
    async fn fetch_invoices(&self, _store_id: &str) -> Result<Vec<Invoice>, IngestionError> {
        match &self.invoices_failure {
            Some(cause) => Err(IngestionError::unavailable(Provider::BtcPay, cause)),
            None => Ok(self.invoices.clone()),
        }
    }

    async fn fetch_payment_methods(
        &self,
        _store_id: &str,
        invoice_id: &str,
    ) -> Result<Vec<PaymentMethod>, IngestionError> {
        let counters = &self.counters;
        counters.payment_method_calls.fetch_add(1, Ordering::SeqCst);
        let now = counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        counters.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let result = if self.failing_invoices.contains(invoice_id) {
            Err(IngestionError::unavailable(Provider::BtcPay, "HTTP 500 Internal Server Error"))
        } else {
            self.payment_methods.get(invoice_id).cloned().ok_or_else(|| {
                IngestionError::unavailable(Provider::BtcPay, format!("HTTP 404 for invoice {}", invoice_id))
            })
        };

        counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn fetch_rates(
        &self,
        _store_id: &str,
        currency_pairs: &[String],
    ) -> Result<Vec<Rate>, IngestionError> {
        Ok(self
            .rates
            .iter()
            .filter(|r| currency_pairs.contains(&r.currency_pair))
            .cloned()
            .collect())
    }
}

/// Mock card provider.
#[derive(Debug, Default, Clone)]
pub struct MockChargeSource {
    /// Charges to return from `fetch_charges`.
    pub charges: Vec<Charge>,

    /// If set, `fetch_charges` fails with this cause.
    pub failure: Option<String>,
}

impl MockChargeSource {
    /// Create a new empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the charges to return (builder pattern).
    pub fn with_charges(mut self, charges: Vec<Charge>) -> Self {
        self.charges = charges;
        self
    }

    /// Make every fetch fail.
    pub fn with_failure(mut self, cause: impl Into<String>) -> Self {
        self.failure = Some(cause.into());
        self
    }
}

impl ChargeSource for MockChargeSource {
    async fn fetch_charges(&self) -> Result<Vec<Charge>, IngestionError> {
        match &self.failure {
            Some(cause) => Err(IngestionError::unavailable(Provider::Stripe, cause)),
            None => Ok(self.charges.clone()),
        }
    }
}

/// Build an invoice with the given order id.
pub fn invoice(id: &str, order_id: Option<&str>) -> Invoice {
    Invoice {
        id: id.to_string(),
        metadata: InvoiceMetadata {
            order_id: order_id.map(str::to_string),
        },
    }
}

/// Build a payment method entry.
pub fn payment_method(crypto_code: &str, paid: Decimal, rate: Decimal) -> PaymentMethod {
    PaymentMethod {
        crypto_code: crypto_code.to_string(),
        payment_method: None,
        payment_method_paid: Some(paid),
        rate,
    }
}

/// Build a charge tagged with a project slug.
pub fn charge(id: &str, amount: u64, project_slug: Option<&str>) -> Charge {
    Charge {
        id: id.to_string(),
        amount,
        currency: Some("usd".to_string()),
        metadata: ChargeMetadata {
            project_slug: project_slug.map(str::to_string),
        },
    }
}
