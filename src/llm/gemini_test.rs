use super::*;
use crate::llm::config::LlmTimeouts;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};

// =========================================================================
// parse_response
// =========================================================================

#[test]
fn parse_single_part() {
    let body = json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": "## Outline" }] } }]
    });
    assert_eq!(parse_response(&body.to_string()).unwrap().as_deref(), Some("## Outline"));
}

#[test]
fn parse_concatenates_parts_of_first_candidate() {
    let body = json!({
        "candidates": [
            { "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] } },
            { "content": { "parts": [{ "text": "ignored" }] } }
        ]
    });
    assert_eq!(parse_response(&body.to_string()).unwrap().as_deref(), Some("Hello world"));
}

#[test]
fn parse_empty_candidates_is_none() {
    assert!(parse_response(r#"{"candidates": []}"#).unwrap().is_none());
    assert!(parse_response("{}").unwrap().is_none());
}

#[test]
fn parse_candidate_without_content_is_none() {
    let body = json!({ "candidates": [{ "finishReason": "SAFETY" }] });
    assert!(parse_response(&body.to_string()).unwrap().is_none());
}

#[test]
fn parse_invalid_json_errors() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

// =========================================================================
// request shape
// =========================================================================

#[test]
fn request_carries_system_instruction_and_prompt() {
    let value = serde_json::to_value(build_request("Write a hook")).unwrap();
    assert_eq!(value["systemInstruction"]["parts"][0]["text"], SYSTEM_INSTRUCTION);
    assert!(value["systemInstruction"].get("role").is_none());
    assert_eq!(value["contents"][0]["role"], "user");
    assert_eq!(value["contents"][0]["parts"][0]["text"], "Write a hook");
}

#[test]
fn endpoint_url_joins_model() {
    assert_eq!(
        endpoint_url("https://example.test/v1beta/", "gemini-2.5-flash"),
        "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

// =========================================================================
// generate over HTTP
// =========================================================================

async fn serve(status: StatusCode, reply: Value) -> String {
    let app = Router::new().route(
        "/models/{action}",
        post(move |headers: HeaderMap, axum::Json(body): axum::Json<Value>| {
            let reply = reply.clone();
            async move {
                assert_eq!(headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()), Some("test-key"));
                assert!(body["contents"][0]["parts"][0]["text"].is_string());
                (status, axum::Json(reply))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(base_url: String) -> GeminiClient {
    GeminiClient::new(LlmConfig {
        api_key: "test-key".into(),
        model: "gemini-test".into(),
        base_url,
        timeouts: LlmTimeouts { request_secs: Some(5), connect_secs: 5 },
    })
    .unwrap()
}

#[tokio::test]
async fn generate_returns_text() {
    let base = serve(StatusCode::OK, json!({ "candidates": [{ "content": { "parts": [{ "text": "done" }] } }] })).await;
    let text = client_for(base).generate("prompt").await.unwrap();
    assert_eq!(text, "done");
}

#[tokio::test]
async fn generate_empty_content_uses_fallback() {
    let base = serve(StatusCode::OK, json!({ "candidates": [] })).await;
    let text = client_for(base).generate("prompt").await.unwrap();
    assert_eq!(text, EMPTY_CONTENT_FALLBACK);
}

#[tokio::test]
async fn generate_non_success_status_errors() {
    let base = serve(StatusCode::TOO_MANY_REQUESTS, json!({ "error": { "message": "quota" } })).await;
    let err = client_for(base).generate("prompt").await.unwrap_err();
    assert!(matches!(err, LlmError::ApiResponse { status: 429, .. }));
}

#[tokio::test]
async fn generate_unreachable_host_errors() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = client_for(format!("http://{addr}")).generate("prompt").await.unwrap_err();
    assert!(matches!(err, LlmError::ApiRequest(_)));
}
