//! fund-server: Main binary for the donation reconciliation service.
//!
//! This binary wires together all crates and starts the HTTP server.

mod config;

use config::ServerConfig;
use fund_aggregator::Aggregator;
use fund_api::{create_router, AppState};
use fund_ingestion::{BtcPayClient, StripeClient};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fund_server=info,fund_api=info,fund_aggregator=info,fund_ingestion=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!(
        "Starting fund-server on {} ({} funds, invoice provider {})",
        config.bind_addr(),
        config.funds.len(),
        config.btcpay.base_url
    );

    // One aggregator per fund; the invoice provider is shared, stores differ
    let mut state = AppState::new();
    for fund in &config.funds {
        let invoices = BtcPayClient::new(&config.btcpay)?;
        let charges = StripeClient::new(&fund.stripe)?;
        tracing::info!("Fund {}: store {}", fund.name, fund.aggregator.store_id);
        state = state.with_fund(
            fund.name.clone(),
            Aggregator::new(invoices, charges, fund.aggregator.clone()),
        );
    }

    let app = create_router(Arc::new(state));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET /health                                    - Health check");
    tracing::info!("  GET /v1/funds/:fund/projects/:project/donations - Donation totals");
    tracing::info!("  GET /v1/funds/:fund/projects/:project/summary   - Funding progress");
    tracing::info!("  GET /v1/funds/:fund/targets                     - Native targets");

    axum::serve(listener, app).await?;

    Ok(())
}
