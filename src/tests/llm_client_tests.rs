use wiremock::matchers::{ body_partial_json, header, method, path };
use wiremock::{ Mock, MockServer, ResponseTemplate };

use super::setup;
use crate::implementations::config::Provider;
use crate::implementations::llm_client::{ HttpChatModel, LlmError };
use crate::traits::{ ChatModel, StructuredPrompt };

fn test_prompt() -> StructuredPrompt {
    StructuredPrompt {
        system: "You are the QA Agent.".to_string(),
        user: "{\"game_description\": \"Pong\"}".to_string(),
        schema_name: "ReviewResult".to_string(),
        schema: serde_json::json!({ "type": "object" }),
    }
}

#[tokio::test]
async fn test_openai_reply_content_is_returned() {
    setup();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(
            body_partial_json(
                serde_json::json!({
                "model": "gpt-4o",
                "response_format": { "type": "json_schema", "json_schema": { "name": "ReviewResult" } }
            })
            )
        )
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                "id": "chatcmpl-1",
                "choices": [
                    { "index": 0, "message": { "role": "assistant", "content": "{\"reasoning\": \"ok\", \"correct\": true}" } }
                ]
            })
            )
        )
        .expect(1)
        .mount(&server).await;

    let model = HttpChatModel::new(
        Provider::OpenAI,
        "sk-test",
        format!("{}/v1/chat/completions", server.uri()),
        "gpt-4o"
    ).unwrap();

    let content = model.complete(&test_prompt()).await.unwrap();
    assert_eq!(content, "{\"reasoning\": \"ok\", \"correct\": true}");
}

#[tokio::test]
async fn test_anthropic_text_blocks_are_returned() {
    setup();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(serde_json::json!({ "system": "You are the QA Agent." })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                "id": "msg_1",
                "content": [ { "type": "text", "text": "{\"reasoning\": \"fine\", \"correct\": false}" } ]
            })
            )
        )
        .mount(&server).await;

    let model = HttpChatModel::new(
        Provider::Anthropic,
        "sk-ant",
        format!("{}/v1/messages", server.uri()),
        "claude-3-5-sonnet-latest"
    ).unwrap();

    let content = model.complete(&test_prompt()).await.unwrap();
    assert_eq!(content, "{\"reasoning\": \"fine\", \"correct\": false}");
}

#[tokio::test]
async fn test_non_success_status_maps_to_http_error() {
    setup();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server).await;

    let model = HttpChatModel::new(Provider::OpenAI, "bad", server.uri(), "gpt-4o").unwrap();

    match model.complete(&test_prompt()).await {
        Err(LlmError::Http { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid api key");
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices_is_empty_response() {
    setup();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&server).await;

    let model = HttpChatModel::new(Provider::OpenAI, "sk-test", server.uri(), "gpt-4o").unwrap();

    assert!(matches!(model.complete(&test_prompt()).await, Err(LlmError::EmptyResponse)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    setup();
    let model = HttpChatModel::new(Provider::OpenAI, "sk-test", "http://127.0.0.1:9/v1/chat/completions", "gpt-4o").unwrap();

    assert!(matches!(model.complete(&test_prompt()).await, Err(LlmError::Network(_))));
}
