use axum::body::Body;
use axum::http::{Request, StatusCode};
use cas_synthesis::core::prompt::build_prompt;
use cas_synthesis::{
    build_router, AppState, CasNumber, CompletionClient, PerplexityClient, SynthesisError,
    SynthesisService, UpstreamConfig,
};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn ethanol_prompt() -> cas_synthesis::domain::model::Prompt {
    build_prompt(&CasNumber::parse("64-17-5").unwrap())
}

fn client_for(server: &MockServer) -> PerplexityClient {
    let config = UpstreamConfig::new(server.url("/chat/completions"), "pplx-test")
        .with_timeout_seconds(1);
    PerplexityClient::new(config).unwrap()
}

#[tokio::test]
async fn test_request_shape_and_raw_body() {
    let server = MockServer::start();
    let answer = json!({
        "choices": [{ "message": { "role": "assistant", "content": "{\"synthesis_methods\": []}" } }]
    });

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .header("Authorization", "Bearer pplx-test")
            .json_body_partial(r#"{"model": "sonar", "search_filter": "academic"}"#)
            .body_contains("CAS number 64-17-5")
            .body_contains("json_schema");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(answer.clone());
    });

    let raw = client_for(&server).complete(&ethanol_prompt()).await.unwrap();

    api_mock.assert();
    assert_eq!(serde_json::from_str::<serde_json::Value>(&raw).unwrap(), answer);
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(401).body("invalid api key");
    });

    let err = client_for(&server).complete(&ethanol_prompt()).await.unwrap_err();

    api_mock.assert();
    assert!(matches!(err, SynthesisError::AuthError { .. }));
}

#[tokio::test]
async fn test_server_error_is_upstream_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(500).body("overloaded");
    });

    let err = client_for(&server).complete(&ethanol_prompt()).await.unwrap_err();

    // no retry: exactly one outbound call
    api_mock.assert_hits(1);
    match err {
        SynthesisError::UpstreamError { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).delay(Duration::from_secs(3)).body("{}");
    });

    let err = client_for(&server).complete(&ethanol_prompt()).await.unwrap_err();
    assert!(matches!(err, SynthesisError::NetworkError(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let config = UpstreamConfig::new("http://127.0.0.1:9/chat/completions", "pplx-test")
        .with_timeout_seconds(1);
    let client = PerplexityClient::new(config).unwrap();

    let err = client.complete(&ethanol_prompt()).await.unwrap_err();
    assert!(matches!(err, SynthesisError::NetworkError(_)));
}

#[test]
fn test_missing_key_is_rejected_at_construction() {
    let config = UpstreamConfig::new("https://api.perplexity.ai/chat/completions", "");
    assert!(matches!(
        PerplexityClient::new(config),
        Err(SynthesisError::MissingConfigError { .. })
    ));
}

#[tokio::test]
async fn test_upstream_timeout_maps_to_service_unavailable() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).delay(Duration::from_secs(3)).body("{}");
    });

    let service = SynthesisService::new(Arc::new(client_for(&server)));
    let router = build_router(AppState::new(service));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/synthesis/64-17-5")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    api_mock.assert_hits(1);
}

#[test]
fn test_end_to_end_against_mock_upstream() {
    let server = MockServer::start();
    let content = json!({
        "synthesis_methods": [{
            "reagents": ["glucose"],
            "conditions": "Saccharomyces cerevisiae fermentation",
            "time": "72 h",
            "temp": "30 °C",
            "yield": "45%",
            "source": { "title": "Fermentation study", "doi": "10.1000/ferm" }
        }]
    })
    .to_string();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        }));
    });

    let service = SynthesisService::new(Arc::new(client_for(&server)));
    let result = tokio_test::block_on(service.lookup("64-17-5")).unwrap();

    assert_eq!(result.total_methods, 1);
    assert_eq!(result.synthesis_methods[0].time, "72 h");
    assert_eq!(result.synthesis_methods[0].source.doi, "10.1000/ferm");
    assert_eq!(result.synthesis_methods[0].source.authors, "");
}
