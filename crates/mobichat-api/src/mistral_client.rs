use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use mobichat_types::{ChatRequest, ChatResponse, Message, Usage, DEFAULT_TEMPERATURE, MAX_RETRIES};

/// Default chat-completions endpoint
pub const MISTRAL_API_URL: &str = "https://api.mistral.ai/v1/chat/completions";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the model API
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("model API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("rate limit still exceeded after {0} retries")]
    RateLimited(u32),
    #[error("model API returned no choices")]
    EmptyResponse,
    #[error("failed to parse model response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// One model turn: the assistant message plus token accounting
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub message: Message,
    pub usage: Option<Usage>,
}

/// Chat backend seam
///
/// The session only sees this trait; tests drive the dispatch loop with a
/// scripted implementation instead of the hosted model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat(
        &self,
        messages: &[Message],
        tools: &[serde_json::Value],
    ) -> Result<ChatOutcome, LlmError>;
}

/// Mistral chat-completions client (OpenAI-compatible wire format)
pub struct MistralClient {
    api_key: String,
    model: String,
    api_url: String,
    client: reqwest::Client,
}

impl MistralClient {
    pub fn new(api_key: String, model: String, api_url: String) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            api_key,
            model,
            api_url,
            client,
        })
    }

    fn build_chat_request(&self, messages: &[Message], tools: &[serde_json::Value]) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            temperature: Some(DEFAULT_TEMPERATURE),
            tool_choice: if tools.is_empty() {
                None
            } else {
                Some("auto".to_string())
            },
            tools: tools.to_vec(),
            messages: messages.to_vec(),
        }
    }
}

#[async_trait]
impl LlmClient for MistralClient {
    async fn chat(
        &self,
        messages: &[Message],
        tools: &[serde_json::Value],
    ) -> Result<ChatOutcome, LlmError> {
        let request = self.build_chat_request(messages, tools);

        // Retry logic with exponential backoff for rate limiting
        let mut retry_count = 0;
        loop {
            let response = self
                .client
                .post(&self.api_url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await?;

            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if retry_count >= MAX_RETRIES {
                    return Err(LlmError::RateLimited(MAX_RETRIES));
                }
                let wait_time = Duration::from_secs(2u64.pow(retry_count));
                sleep(wait_time).await;
                retry_count += 1;
                continue;
            }

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api { status, body });
            }

            let response_text = response.text().await?;
            let chat_response: ChatResponse = serde_json::from_str(&response_text)?;

            let message = chat_response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message)
                .ok_or(LlmError::EmptyResponse)?;

            return Ok(ChatOutcome {
                message,
                usage: chat_response.usage,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tool_definition() -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": "get_coordinates",
                "description": "Look up a place",
                "parameters": {
                    "type": "object",
                    "properties": {"place": {"type": "string"}},
                    "required": ["place"]
                }
            }
        })
    }

    #[test]
    fn test_request_carries_temperature_and_tool_choice() {
        let client = MistralClient::new(
            "key".to_string(),
            "mistral-small-latest".to_string(),
            MISTRAL_API_URL.to_string(),
        )
        .unwrap();

        let request =
            client.build_chat_request(&[Message::system("prompt")], &[test_tool_definition()]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "mistral-small-latest");
        assert!((value["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
        assert_eq!(value["tool_choice"], "auto");
        assert_eq!(value["tools"][0]["function"]["name"], "get_coordinates");
    }

    #[test]
    fn test_request_without_tools_omits_tool_choice() {
        let client = MistralClient::new(
            "key".to_string(),
            "mistral-small-latest".to_string(),
            MISTRAL_API_URL.to_string(),
        )
        .unwrap();

        let request = client.build_chat_request(&[Message::system("prompt")], &[]);
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tool_choice").is_none());
        assert!(value.get("tools").is_none());
    }
}
