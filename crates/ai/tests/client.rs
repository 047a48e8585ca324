//! AI client tests against a mock completion server.

use assert_matches::assert_matches;
use bidtrack_ai::prompts::{AnalyzeTenderRequest, GenerateBidRequest};
use bidtrack_ai::{AiClient, AiConfig, AiError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn client_for(server: &MockServer, key: Option<&str>) -> AiClient {
    let mut config = AiConfig::with_url(format!("{}/v1", server.uri()));
    config.api_key = key.map(str::to_string);
    AiClient::new(&config).unwrap()
}

fn analyze() -> AnalyzeTenderRequest {
    AnalyzeTenderRequest {
        title: "Road Construction".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn relays_json_answer_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4o-mini" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(r#"{"score": 81, "recommendation": "bid"}"#)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let out = client_for(&server, Some("sk-test")).run(&analyze()).await.unwrap();
    assert_eq!(out, json!({"score": 81, "recommendation": "bid"}));
}

#[tokio::test]
async fn wraps_plain_text_as_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("Respected Sir/Madam, ...")),
        )
        .mount(&server)
        .await;

    let req = GenerateBidRequest {
        title: "Bridge".into(),
        ..Default::default()
    };
    let out = client_for(&server, None).run(&req).await.unwrap();
    assert_eq!(out, json!({"content": "Respected Sir/Madam, ..."}));
}

#[tokio::test]
async fn sends_system_and_user_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system" },
                { "role": "user", "content": "Tender: Road Construction\n" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server, None).run(&analyze()).await.unwrap();
}

#[tokio::test]
async fn upstream_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = client_for(&server, None).run(&analyze()).await.unwrap_err();
    assert_matches!(err, AiError::ApiError { status: 429, ref body } if body == "rate limited");
}

#[tokio::test]
async fn missing_choices_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server, None).run(&analyze()).await.unwrap_err();
    assert_matches!(err, AiError::EmptyResponse);
}

#[tokio::test]
async fn non_json_body_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server, None).run(&analyze()).await.unwrap_err();
    assert_matches!(err, AiError::Request(_));
}
