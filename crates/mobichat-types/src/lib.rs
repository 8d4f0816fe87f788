//! Core types and structures for mobichat
//!
//! This crate provides the message and wire types shared across all mobichat
//! crates: the conversation message format and the OpenAI-compatible
//! chat-completions request/response structures the Mistral API speaks.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Maximum number of retries for rate-limited API calls
pub const MAX_RETRIES: u32 = 3;

/// Maximum number of tool-call rounds within a single user turn
pub const MAX_TOOL_ITERATIONS: usize = 10;

/// Chat model used unless overridden by flag or environment
pub const DEFAULT_MODEL: &str = "mistral-small-latest";

/// Sampling temperature pinned for route-planning conversations
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

// ============================================================================
// Message Types
// ============================================================================

/// Helper function to deserialize string or null values
///
/// The API reports `content: null` on assistant messages that only carry
/// tool calls; map that to an empty string instead of failing.
pub fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

/// Message structure for the chat API
///
/// One struct covers all four roles; `tool_calls` is only ever present on
/// assistant messages, `tool_call_id`/`name` only on tool-result messages.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Message {
    #[serde(default)]
    pub role: String,
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Tool-result message tied to the tool call that requested it
    pub fn tool(content: impl Into<String>, tool_call_id: String, tool_name: String) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.into(),
            tool_calls: None,
            tool_call_id: Some(tool_call_id),
            name: Some(tool_name),
        }
    }
}

/// Tool call structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionCall,
}

/// Function call structure within a tool call
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

// ============================================================================
// Chat API Wire Types
// ============================================================================

/// Chat API request structure
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<serde_json::Value>,
    pub messages: Vec<Message>,
}

/// Token usage information from API response
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// Chat API response structure
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Choice structure within chat response
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Message,
    #[serde(default)]
    pub index: Option<i32>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("hello");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "hello");
        assert!(msg.tool_calls.is_none());

        let msg = Message::tool("result".to_string(), "call_1".to_string(), "get_route".to_string());
        assert_eq!(msg.role, "tool");
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(msg.name.as_deref(), Some("get_route"));
    }

    #[test]
    fn test_null_content_deserializes_to_empty() {
        let json = r#"{
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": {"name": "get_coordinates", "arguments": "{\"place\": \"gare du midi\"}"}
            }]
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.content, "");
        let calls = msg.tool_calls.unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "get_coordinates");
    }

    #[test]
    fn test_plain_message_serializes_without_tool_fields() {
        let msg = Message::user("hi");
        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("tool_calls").is_none());
        assert!(value.get("tool_call_id").is_none());
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_chat_request_omits_empty_tools() {
        let request = ChatRequest {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            tool_choice: None,
            tools: Vec::new(),
            messages: vec![Message::system("prompt")],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("tool_choice").is_none());
        assert_eq!(value["model"], DEFAULT_MODEL);
    }

    #[test]
    fn test_chat_response_parsing() {
        let json = r#"{
            "id": "cmpl-1",
            "model": "mistral-small-latest",
            "choices": [{"index": 0, "finish_reason": "stop",
                         "message": {"role": "assistant", "content": "Bonjour!"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.content, "Bonjour!");
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }
}
