use mobichat_api::{LlmClient, LlmError, MistralClient};
use mobichat_types::Message;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MistralClient {
    MistralClient::new(
        "test-key".to_string(),
        "mistral-small-latest".to_string(),
        format!("{}/v1/chat/completions", server.uri()),
    )
    .unwrap()
}

#[tokio::test]
async fn chat_returns_assistant_message_and_usage() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "mistral-small-latest"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cmpl-1",
            "choices": [{"index": 0, "finish_reason": "stop",
                         "message": {"role": "assistant", "content": "How can I help?"}}],
            "usage": {"prompt_tokens": 20, "completion_tokens": 5, "total_tokens": 25}
        })))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .chat(&[Message::system("prompt")], &[])
        .await
        .unwrap();

    assert_eq!(outcome.message.role, "assistant");
    assert_eq!(outcome.message.content, "How can I help?");
    assert_eq!(outcome.usage.unwrap().total_tokens, 25);
}

#[tokio::test]
async fn chat_parses_tool_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"index": 0, "finish_reason": "tool_calls", "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "get_coordinates",
                                 "arguments": "{\"place\": \"gare du midi\"}"}
                }]
            }}]
        })))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .chat(&[Message::user("route to gare du midi")], &[])
        .await
        .unwrap();

    let calls = outcome.message.tool_calls.unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "call_1");
    assert_eq!(calls[0].function.name, "get_coordinates");
    assert_eq!(outcome.message.content, "");
}

#[tokio::test]
async fn chat_surfaces_api_errors_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chat(&[Message::user("hi")], &[])
        .await
        .unwrap_err();

    match err {
        LlmError::Api { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn chat_retries_rate_limits_then_succeeds() {
    let server = MockServer::start().await;

    // First attempt is rate limited, the retry succeeds
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"index": 0, "finish_reason": "stop",
                         "message": {"role": "assistant", "content": "ok"}}]
        })))
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .chat(&[Message::user("hi")], &[])
        .await
        .unwrap();
    assert_eq!(outcome.message.content, "ok");
}

#[tokio::test]
async fn chat_with_no_choices_is_an_empty_response_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chat(&[Message::user("hi")], &[])
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}
