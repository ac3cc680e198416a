// OpenAI-compatible client (HTTP direct, no SDK)

use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
use crate::types::{Message, ToolCall};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Client for any OpenAI-compatible chat-completions endpoint.
///
/// The base URL is what selects the actual backend: api.openai.com by
/// default, GitHub Models or a local Ollama daemon via `with_base_url`.
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: OPENAI_API_BASE.to_string(),
        })
    }

    /// Point the client at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_chat_payload(model: &str, messages: &[Message], options: &ChatOptions) -> Result<Value> {
        let mut obj = serde_json::Map::new();
        obj.insert("model".to_string(), serde_json::json!(model));
        obj.insert("messages".to_string(), serde_json::to_value(messages)?);

        if let Some(temp) = options.temperature {
            obj.insert("temperature".to_string(), serde_json::json!(temp));
        }
        if let Some(max_tokens) = options.max_tokens {
            obj.insert("max_tokens".to_string(), serde_json::json!(max_tokens));
        }
        if let Some(tools) = &options.tools {
            obj.insert("tools".to_string(), serde_json::to_value(tools)?);
        }
        if let Some(tool_choice) = &options.tool_choice {
            obj.insert("tool_choice".to_string(), serde_json::to_value(tool_choice)?);
        }

        Ok(Value::Object(obj))
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload =
            Self::build_chat_payload(&request.model, &request.messages, &request.options)?;

        tracing::debug!(model = %request.model, base_url = %self.base_url, "chat completion request");

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat API error ({}): {}", status, error_text);
        }

        let raw: WireChatResponse = response
            .json()
            .await
            .context("Failed to parse response")?;

        Ok(raw.into_response())
    }
}

// ============================================================================
// WIRE TYPES (chat completions response)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct WireChatResponse {
    pub choices: Vec<WireChoice>,
    pub usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireChoice {
    pub message: WireMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl WireChatResponse {
    pub(crate) fn into_response(mut self) -> ChatResponse {
        let choice = if self.choices.is_empty() {
            None
        } else {
            Some(self.choices.swap_remove(0))
        };

        ChatResponse {
            content: choice.as_ref().and_then(|c| c.message.content.clone()),
            tool_calls: choice.as_ref().and_then(|c| c.message.tool_calls.clone()),
            usage: self.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.and_then(|c| c.finish_reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Tool, ToolChoice};

    #[test]
    fn payload_includes_tools_when_set() {
        let options = ChatOptions::new()
            .tools(vec![Tool::new("echo", "Echo a message", serde_json::json!({"type": "object"}))])
            .tool_choice(ToolChoice::auto());

        let payload = OpenAIClient::build_chat_payload(
            "gpt-4o",
            &[Message::human("hi")],
            &options,
        )
        .unwrap();

        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["tools"][0]["function"]["name"], "echo");
        assert_eq!(payload["tool_choice"], "auto");
        assert!(payload.get("temperature").is_none());
    }

    #[test]
    fn wire_response_maps_tool_calls() {
        let json = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "search_code", "arguments": "{\"q\":\"mcp\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;

        let raw: WireChatResponse = serde_json::from_str(json).unwrap();
        let response = raw.into_response();

        assert!(response.content.is_none());
        let calls = response.tool_calls.unwrap();
        assert_eq!(calls[0].function.name, "search_code");
        assert_eq!(response.finish_reason.as_deref(), Some("tool_calls"));
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }
}
