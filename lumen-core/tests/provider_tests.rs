//! Wire-level tests for the OpenAI and Gemini providers against a mock server

use lumen_core::config::{ProviderSettings, SecretString};
use lumen_core::http::HttpClient;
use lumen_core::protocol::GenerationRequest;
use lumen_core::providers::{GeminiProvider, OpenAIProvider, Provider, ProviderErrorKind};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http() -> HttpClient {
    HttpClient::new(Duration::from_secs(5)).expect("Failed to create client")
}

fn openai(server: &MockServer, api_key: Option<&str>) -> OpenAIProvider {
    let settings = ProviderSettings {
        api_key: api_key.map(SecretString::new),
        base_url: format!("{}/v1/responses", server.uri()),
        model: "gpt-test".to_string(),
    };
    OpenAIProvider::new(&settings, http())
}

fn gemini(server: &MockServer, api_key: Option<&str>) -> GeminiProvider {
    let settings = ProviderSettings {
        api_key: api_key.map(SecretString::new),
        base_url: format!("{}/v1beta", server.uri()),
        model: "gemini-test".to_string(),
    };
    GeminiProvider::new(&settings, http())
}

#[tokio::test]
async fn test_openai_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/responses"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(header_exists("X-Request-ID"))
        .and(body_partial_json(json!({
            "model": "gpt-test",
            "input": [{ "role": "user", "content": [{ "type": "input_text", "text": "Say hi" }] }],
            "max_output_tokens": 800,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": [{ "content": [{ "type": "output_text", "text": "Hi there" }] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = GenerationRequest::new("Say hi").params();
    let text = openai(&server, Some("sk-test"))
        .generate("Say hi", &params)
        .await
        .unwrap();
    assert_eq!(text, "Hi there");
}

#[tokio::test]
async fn test_openai_upstream_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    let body = r#"{"error":{"message":"Incorrect API key provided"}}"#;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string(body))
        .mount(&server)
        .await;

    let params = GenerationRequest::new("hello").params();
    let err = openai(&server, Some("sk-bad"))
        .generate("hello", &params)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ProviderErrorKind::Upstream);
    assert_eq!(err.status_code, Some(401));
    assert_eq!(err.message, body);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_openai_missing_text_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": [] })))
        .mount(&server)
        .await;

    let params = GenerationRequest::new("hello").params();
    let err = openai(&server, Some("sk-test"))
        .generate("hello", &params)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ProviderErrorKind::Parse);
    assert_eq!(err.status_code, None);
    assert!(err.message.contains("Invalid openai response format"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_openai_non_json_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ invalid json }"))
        .mount(&server)
        .await;

    let params = GenerationRequest::new("hello").params();
    let err = openai(&server, Some("sk-test"))
        .generate("hello", &params)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Parse);
}

#[tokio::test]
async fn test_openai_missing_key_makes_no_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let params = GenerationRequest::new("hello").params();
    for key in [None, Some("   ")] {
        let err = openai(&server, key)
            .generate("hello", &params)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Configuration);
        assert_eq!(err.message, "OPENAI_API_KEY not configured");
        assert_eq!(err.status_code, None);
    }
}

#[tokio::test]
async fn test_gemini_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "g-test"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Explain ser vs estar" }] }],
            "generationConfig": { "temperature": 0.3, "maxOutputTokens": 200 },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Ser is permanent..." }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = GenerationRequest::new("Explain ser vs estar")
        .with_temperature(0.3)
        .with_max_tokens(200)
        .with_task("explain_phrase")
        .params();
    let text = gemini(&server, Some("g-test"))
        .generate("Explain ser vs estar", &params)
        .await
        .unwrap();
    assert_eq!(text, "Ser is permanent...");
}

#[tokio::test]
async fn test_gemini_phrases_request_carries_schema() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "required": ["text", "translation", "category", "difficulty"],
                    },
                },
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "[]" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = GenerationRequest::new("list phrases")
        .with_task("generate_phrases")
        .params();
    let text = gemini(&server, Some("g-test"))
        .generate("list phrases", &params)
        .await
        .unwrap();
    assert_eq!(text, "[]");
}

#[test]
fn test_gemini_plain_request_has_no_schema() {
    let settings = ProviderSettings {
        api_key: None,
        base_url: "https://example.test/v1beta/".to_string(),
        model: "gemini-test".to_string(),
    };
    let provider = GeminiProvider::new(&settings, http());
    assert_eq!(
        provider.url(),
        "https://example.test/v1beta/models/gemini-test:generateContent"
    );

    let body = provider.request_body("hi", &GenerationRequest::new("hi").params());
    assert!(body["generationConfig"].get("responseSchema").is_none());
    assert!(body["generationConfig"].get("responseMimeType").is_none());

    let params = GenerationRequest::new("hi")
        .with_task("Generate_Phrases")
        .params();
    let body = provider.request_body("hi", &params);
    assert!(body["generationConfig"].get("responseSchema").is_none());
}

#[tokio::test]
async fn test_gemini_server_error_is_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let params = GenerationRequest::new("hello").params();
    let err = gemini(&server, Some("g-test"))
        .generate("hello", &params)
        .await
        .unwrap_err();
    assert_eq!(err.status_code, Some(503));
    assert_eq!(err.message, "overloaded");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_gemini_missing_key() {
    let server = MockServer::start().await;
    let params = GenerationRequest::new("hello").params();
    let err = gemini(&server, None)
        .generate("hello", &params)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Configuration);
    assert_eq!(err.message, "GEMINI_API_KEY not configured");
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let settings = ProviderSettings {
        api_key: Some(SecretString::new("sk-test")),
        base_url: format!("{}/v1/responses", server.uri()),
        model: "gpt-test".to_string(),
    };
    let client = HttpClient::new(Duration::from_millis(200)).unwrap();
    let provider = OpenAIProvider::new(&settings, client);

    let params = GenerationRequest::new("hello").params();
    let err = provider.generate("hello", &params).await.unwrap_err();
    assert_eq!(err.kind, ProviderErrorKind::Transport);
    assert_eq!(err.status_code, None);
}
