// Azure OpenAI client (HTTP direct, no SDK)

use crate::openai::WireChatResponse;
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse};
use crate::types::Message;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;

/// Azure OpenAI client.
///
/// Azure differs from the OpenAI surface in two ways:
/// - URL: `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`
/// - Auth: `api-key` header instead of `Authorization: Bearer`
///
/// The deployment name travels in the request's `model` field.
#[derive(Debug)]
pub struct AzureOpenAIClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_version: String,
}

impl AzureOpenAIClient {
    pub fn builder() -> AzureOpenAIClientBuilder {
        AzureOpenAIClientBuilder::default()
    }

    fn build_chat_payload(messages: &[Message], options: &ChatOptions) -> Result<Value> {
        // Azure takes the deployment from the URL, so no "model" field here.
        let mut obj = serde_json::Map::new();
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

    fn chat_url(&self, deployment: &str) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, deployment, self.api_version
        )
    }
}

#[async_trait]
impl ChatClient for AzureOpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload = Self::build_chat_payload(&request.messages, &request.options)?;
        let url = self.chat_url(&request.model);

        tracing::debug!(deployment = %request.model, "azure chat completion request");

        let response = self
            .http_client
            .post(url)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Azure OpenAI API error ({}): {}", status, error_text);
        }

        let raw: WireChatResponse = response
            .json()
            .await
            .context("Failed to parse response")?;

        Ok(raw.into_response())
    }
}

#[derive(Default)]
pub struct AzureOpenAIClientBuilder {
    api_key: Option<String>,
    endpoint: Option<String>,
    api_version: Option<String>,
}

impl AzureOpenAIClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn build(self) -> Result<AzureOpenAIClient> {
        let api_key = self.api_key.context("Azure API key is required")?;
        let endpoint = self.endpoint.context("Azure endpoint is required")?;
        let api_version = self.api_version.context("Azure API version is required")?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "api-key",
            HeaderValue::from_str(&api_key).context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(AzureOpenAIClient {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_all_fields() {
        let result = AzureOpenAIClient::builder().api_key("key").build();
        assert!(result.is_err());
    }

    #[test]
    fn chat_url_uses_deployment_and_version() {
        let client = AzureOpenAIClient::builder()
            .api_key("key")
            .endpoint("https://my-resource.openai.azure.com/")
            .api_version("2024-08-01-preview")
            .build()
            .unwrap();

        assert_eq!(
            client.chat_url("gpt-4o-deploy"),
            "https://my-resource.openai.azure.com/openai/deployments/gpt-4o-deploy/chat/completions?api-version=2024-08-01-preview"
        );
    }

    #[test]
    fn payload_has_no_model_field() {
        let payload =
            AzureOpenAIClient::build_chat_payload(&[Message::human("hi")], &ChatOptions::new())
                .unwrap();
        assert!(payload.get("model").is_none());
        assert_eq!(payload["messages"][0]["role"], "user");
    }
}
