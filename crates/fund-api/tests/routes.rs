//! Route tests driven through the router with `oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use fund_aggregator::{Aggregator, AggregatorConfig};
use fund_api::{create_router, AppState};
use fund_ingestion::mock::{charge, invoice, payment_method};
use fund_ingestion::{MockChargeSource, MockInvoiceSource, Rate};
use rust_decimal_macros::dec;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn store() -> MockInvoiceSource {
    MockInvoiceSource::new()
        .with_invoice(
            invoice("A", Some("proj1")),
            vec![
                payment_method("XMR", dec!(1.0), dec!(160)),
                payment_method("BTC", dec!(0), dec!(60000)),
            ],
        )
        .with_invoice(
            invoice("B", Some("proj1_STATIC")),
            vec![payment_method("BTC", dec!(0.01), dec!(60000))],
        )
        .with_invoice(
            invoice("C", Some("proj2")),
            vec![payment_method("XMR", dec!(5), dec!(160))],
        )
        .with_rates(vec![
            Rate {
                currency_pair: "XMR_USD".into(),
                rate: Some(dec!(160)),
            },
            Rate {
                currency_pair: "BTC_USD".into(),
                rate: Some(dec!(64000)),
            },
        ])
}

fn app(invoices: MockInvoiceSource, charges: MockChargeSource) -> Router {
    let state = AppState::new().with_fund(
        "monero",
        Aggregator::new(invoices, charges, AggregatorConfig::new("store1")),
    );
    create_router(Arc::new(state))
}

fn default_app() -> Router {
    app(
        store(),
        MockChargeSource::new().with_charges(vec![charge("ch_1", 2500, Some("proj1"))]),
    )
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn decimal(value: &Value) -> rust_decimal::Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(default_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_donations() {
    let (status, body) = get(default_app(), "/v1/funds/monero/projects/proj1/donations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fund"], "monero");
    assert_eq!(body["project"], "proj1");
    assert_eq!(body["by_asset"]["XMR"]["numDonations"], 1);
    assert_eq!(decimal(&body["by_asset"]["XMR"]["totalDonationsFiat"]), dec!(160));
    assert_eq!(body["by_asset"]["BTC"]["numDonations"], 1);
    assert_eq!(decimal(&body["by_asset"]["BTC"]["totalDonationsFiat"]), dec!(600));
    assert_eq!(body["card"]["numDonations"], 1);
    assert_eq!(decimal(&body["card"]["totalDonationsFiat"]), dec!(25));
}

#[tokio::test]
async fn test_donations_for_project_without_records() {
    let (status, body) = get(default_app(), "/v1/funds/monero/projects/nothing/donations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["by_asset"]["XMR"]["numDonations"], 0);
    assert_eq!(body["by_asset"]["BTC"]["numDonations"], 0);
    assert_eq!(body["card"]["numDonations"], 0);
}

#[tokio::test]
async fn test_unknown_fund() {
    let (status, body) = get(default_app(), "/v1/funds/firo/projects/proj1/donations").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_summary() {
    let (status, body) = get(default_app(), "/v1/funds/monero/projects/proj1/summary?goal=1570").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"], "proj1");
    assert_eq!(decimal(&body["total_fiat"]), dec!(785));
    assert_eq!(body["contributions"], 3);
    assert_eq!(decimal(&body["raised_fraction"]), dec!(0.5));
}

#[tokio::test]
async fn test_summary_rejects_bad_goal() {
    let (status, body) = get(default_app(), "/v1/funds/monero/projects/proj1/summary").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, _) = get(default_app(), "/v1/funds/monero/projects/proj1/summary?goal=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(default_app(), "/v1/funds/monero/projects/proj1/summary?goal=-10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invoice_provider_failure_is_bad_gateway() {
    let app = app(
        store().with_invoices_failure("HTTP 500 Internal Server Error"),
        MockChargeSource::new(),
    );

    let (status, body) = get(app, "/v1/funds/monero/projects/proj1/donations").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "provider_unavailable");
}

#[tokio::test]
async fn test_card_provider_failure_fails_summary() {
    let app = app(store(), MockChargeSource::new().with_failure("connection refused"));

    let (status, _) = get(app, "/v1/funds/monero/projects/proj1/summary?goal=100").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_targets() {
    let (status, body) = get(default_app(), "/v1/funds/monero/targets?goal=1600").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fund"], "monero");
    assert_eq!(body["fiat_currency"], "USD");
    assert_eq!(decimal(&body["targets"]["XMR"]), dec!(10));
    assert_eq!(decimal(&body["targets"]["BTC"]), dec!(0.025));
}
