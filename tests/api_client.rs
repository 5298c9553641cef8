//! Integration tests for the blocking HTTP client
//!
//! The blocking client must run off the async runtime threads, so every
//! request goes through spawn_blocking against a wiremock server.

use boluswatch::api::{HttpSource, TreatmentSource};
use boluswatch::config::ApiConfig;
use boluswatch::error::ApiError;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        connect_timeout_secs: 10,
        read_timeout_secs: 10,
    }
}

#[tokio::test]
async fn fetch_treatments_returns_body_on_200() {
    let server = MockServer::start().await;
    let body = "[{\"created_at\":1000,\"insulin\":3.5},{\"created_at\":900,\"insulin\":1.0}]";

    Mock::given(method("GET"))
        .and(path("/treatments.json"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let fetched = tokio::task::spawn_blocking(move || {
        let source = HttpSource::new(&config).unwrap();
        source.fetch_treatments()
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(fetched, body);
}

#[tokio::test]
async fn fetch_iob_hits_pebble_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pebble"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"iob\":{\"iob\":2.5}}"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let fetched = tokio::task::spawn_blocking(move || {
        let source = HttpSource::new(&config).unwrap();
        source.fetch_iob()
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(fetched, "{\"iob\":{\"iob\":2.5}}");
}

#[tokio::test]
async fn non_200_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/treatments.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let result = tokio::task::spawn_blocking(move || {
        let source = HttpSource::new(&config).unwrap();
        source.fetch_treatments()
    })
    .await
    .unwrap();

    match result {
        Err(ApiError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_ok_success_status_is_an_error() {
    // Success is strictly 200; even a 204 counts as failure.
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/treatments.json"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let result = tokio::task::spawn_blocking(move || {
        let source = HttpSource::new(&config).unwrap();
        source.fetch_treatments()
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(ApiError::Status { status: 204, .. })));
}

#[tokio::test]
async fn connection_refused_is_a_request_error() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        connect_timeout_secs: 2,
        read_timeout_secs: 2,
    };

    let result = tokio::task::spawn_blocking(move || {
        let source = HttpSource::new(&config).unwrap();
        source.fetch_treatments()
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(ApiError::Request { .. })));
}
