//! Provider adapter behavior against canned HTTP responses.

use std::sync::Arc;

use intrinsic_core::{ErrorKind, HttpError, HttpResponse, ProviderConfig, ProviderId, StubHttpClient};
use intrinsic_tests::{alphavantage_stub, fmp_stub, stubbed_source as source, ticker};

const IBM_OVERVIEW: &str = r#"{"Symbol":"IBM","Name":"International Business Machines","EPS":"8.14"}"#;
const IBM_QUOTE: &str = r#"{"Global Quote":{"01. symbol":"IBM","05. price":"131.5500","07. latest trading day":"2024-05-03"}}"#;

const FMP_QUOTE: &str = r#"[{"symbol":"MSFT","price":406.66}]"#;
const FMP_INCOME: &str = r#"[
    {"date":"2023-06-30","calendarYear":"2023","eps":9.72},
    {"date":"2022-06-30","calendarYear":"2022","eps":9.70},
    {"date":"2021-06-30","calendarYear":"2021","eps":8.12},
    {"date":"2020-06-30","calendarYear":"2020","eps":5.82}
]"#;

fn ibm_stub() -> StubHttpClient {
    alphavantage_stub(IBM_OVERVIEW, IBM_QUOTE)
}

// =============================================================================
// Alpha Vantage
// =============================================================================

#[tokio::test]
async fn alphavantage_string_numbers_become_a_snapshot() {
    let client = Arc::new(ibm_stub());
    let source = source(ProviderId::Alphavantage, client.clone());

    let snapshot = source.fetch_snapshot(ticker("ibm")).await.expect("snapshot");

    assert_eq!(snapshot.ticker.as_str(), "IBM");
    assert_eq!(snapshot.provider, ProviderId::Alphavantage);
    assert_eq!(snapshot.eps, 8.14);
    assert_eq!(snapshot.price, 131.55);
    assert_eq!(snapshot.growth_rate, None);

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.url.starts_with("http://stub.local/query?")));
    assert!(requests.iter().all(|r| r.url.contains("symbol=IBM")));
    assert!(requests.iter().all(|r| r.url.contains("apikey=secret-key")));
}

#[tokio::test]
async fn alphavantage_server_error_is_a_provider_error() {
    let client = Arc::new(
        StubHttpClient::new()
            .route("function=OVERVIEW", HttpResponse::with_status(500, "oops"))
            .route("function=GLOBAL_QUOTE", HttpResponse::ok_json(IBM_QUOTE)),
    );
    let source = source(ProviderId::Alphavantage, client);

    let err = source.fetch_snapshot(ticker("IBM")).await.expect_err("500");
    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(err.retryable());
    assert!(err.message().contains("500"), "{err}");
}

#[tokio::test]
async fn alphavantage_rate_limit_note_is_a_provider_error() {
    let note = r#"{"Note":"Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;
    let client = Arc::new(
        StubHttpClient::new()
            .route("function=OVERVIEW", HttpResponse::ok_json(note))
            .route("function=GLOBAL_QUOTE", HttpResponse::ok_json(note)),
    );
    let source = source(ProviderId::Alphavantage, client);

    let err = source.fetch_snapshot(ticker("IBM")).await.expect_err("throttled");
    assert_eq!(err.kind(), ErrorKind::Provider);
}

#[tokio::test]
async fn alphavantage_malformed_json_is_a_data_error() {
    let client = Arc::new(
        StubHttpClient::new()
            .route("function=OVERVIEW", HttpResponse::ok_json("<html>not json</html>"))
            .route("function=GLOBAL_QUOTE", HttpResponse::ok_json(IBM_QUOTE)),
    );
    let source = source(ProviderId::Alphavantage, client);

    let err = source.fetch_snapshot(ticker("IBM")).await.expect_err("malformed");
    assert_eq!(err.kind(), ErrorKind::Data);
    assert!(!err.retryable());
}

#[tokio::test]
async fn alphavantage_unparsable_eps_is_a_data_error() {
    let client = Arc::new(
        StubHttpClient::new()
            .route(
                "function=OVERVIEW",
                HttpResponse::ok_json(r#"{"Symbol":"IBM","EPS":"abc"}"#),
            )
            .route("function=GLOBAL_QUOTE", HttpResponse::ok_json(IBM_QUOTE)),
    );
    let source = source(ProviderId::Alphavantage, client);

    let err = source.fetch_snapshot(ticker("IBM")).await.expect_err("bad eps");
    assert_eq!(err.kind(), ErrorKind::Data);
    assert!(err.message().contains("EPS"), "{err}");
}

#[tokio::test]
async fn transport_timeout_is_a_provider_error() {
    let client = Arc::new(
        StubHttpClient::new()
            .route_error("function=OVERVIEW", HttpError::timeout("deadline elapsed"))
            .route("function=GLOBAL_QUOTE", HttpResponse::ok_json(IBM_QUOTE)),
    );
    let source = source(ProviderId::Alphavantage, client);

    let err = source.fetch_snapshot(ticker("IBM")).await.expect_err("timeout");
    assert_eq!(err.kind(), ErrorKind::Provider);
}

// =============================================================================
// Financial Modeling Prep
// =============================================================================

#[tokio::test]
async fn fmp_derives_growth_from_annual_eps() {
    let client = Arc::new(fmp_stub(FMP_QUOTE, FMP_INCOME));
    let source = source(ProviderId::Fmp, client.clone());

    let snapshot = source.fetch_snapshot(ticker("MSFT")).await.expect("snapshot");

    assert_eq!(snapshot.eps, 9.72);
    assert_eq!(snapshot.price, 406.66);
    let growth = snapshot.growth_rate.expect("four periods give a growth rate");
    let expected = (9.72_f64 / 5.82).powf(1.0 / 3.0) - 1.0;
    assert!((growth - expected).abs() < 1e-12, "growth {growth}");

    let requests = client.recorded_requests();
    assert!(requests
        .iter()
        .any(|r| r.url.contains("/api/v3/income-statement/MSFT?period=annual&limit=5")));
}

#[tokio::test]
async fn fmp_missing_fiscal_year_does_not_inflate_growth() {
    // FY2022 is absent from the statements.
    let income = r#"[
        {"date":"2023-06-30","calendarYear":"2023","eps":1.331},
        {"date":"2021-06-30","calendarYear":"2021","eps":1.10},
        {"date":"2020-06-30","calendarYear":"2020","eps":1.00}
    ]"#;
    let source = source(ProviderId::Fmp, Arc::new(fmp_stub(FMP_QUOTE, income)));

    let snapshot = source.fetch_snapshot(ticker("MSFT")).await.expect("snapshot");
    let growth = snapshot.growth_rate.expect("three points over three years");
    assert!((growth - 0.10).abs() < 1e-9, "growth {growth}");
}

#[tokio::test]
async fn fmp_empty_quote_is_a_data_error() {
    let client = Arc::new(fmp_stub("[]", FMP_INCOME));
    let source = source(ProviderId::Fmp, client);

    let err = source.fetch_snapshot(ticker("ZZZZ")).await.expect_err("unknown");
    assert_eq!(err.kind(), ErrorKind::Data);
    assert!(err.message().contains("ZZZZ"), "{err}");
}

#[tokio::test]
async fn fmp_unauthorized_is_a_provider_error() {
    let client = Arc::new(StubHttpClient::new().fallback(Ok(HttpResponse::with_status(
        401,
        r#"{"Error Message":"Invalid API KEY."}"#,
    ))));
    let source = source(ProviderId::Fmp, client);

    let err = source.fetch_snapshot(ticker("MSFT")).await.expect_err("401");
    assert_eq!(err.kind(), ErrorKind::Provider);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn missing_api_key_is_a_config_error_for_every_provider() {
    for provider in ProviderId::ALL {
        let err = ProviderConfig::new(provider, None).expect_err("no key");
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.code(), "config_error");
        assert!(err.message().contains(provider.api_key_env()), "{err}");
    }
}

#[test]
fn api_key_never_appears_in_debug_output() {
    let config = ProviderConfig::new(ProviderId::Fmp, Some("super-secret")).expect("key");
    assert!(!format!("{config:?}").contains("super-secret"));
}
