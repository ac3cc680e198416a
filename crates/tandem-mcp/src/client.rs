use crate::error::McpError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use rmcp::model::{
    CallToolRequestParam, ClientCapabilities, ClientInfo, Implementation, JsonObject,
    PaginatedRequestParam, ProtocolVersion, RawContent, ResourceContents,
};
use rmcp::service::RunningService;
use rmcp::transport::streamable_http_client::StreamableHttpClientTransportConfig;
use rmcp::transport::StreamableHttpClientTransport;
use rmcp::{RoleClient, ServiceExt};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// MCP client connected to one tool server over streamable HTTP.
///
/// Performs the initialize handshake on connect; exposes `tools/list` and
/// `tools/call`. Every request is bounded by the configured timeout.
pub struct McpClient {
    server_name: String,
    url: String,
    request_timeout: Duration,
    service: RunningService<RoleClient, ClientInfo>,
}

impl McpClient {
    /// Connect to an MCP server.
    pub async fn connect(
        server_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, McpError> {
        Self::connect_inner(server_name.into(), url.into(), None, DEFAULT_REQUEST_TIMEOUT).await
    }

    /// Connect to an MCP server that requires a bearer token.
    pub async fn connect_with_bearer(
        server_name: impl Into<String>,
        url: impl Into<String>,
        token: impl AsRef<str>,
    ) -> Result<Self, McpError> {
        Self::connect_inner(
            server_name.into(),
            url.into(),
            Some(token.as_ref().to_string()),
            DEFAULT_REQUEST_TIMEOUT,
        )
        .await
    }

    async fn connect_inner(
        server_name: String,
        url: String,
        bearer: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, McpError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("tandem-mcp/0.1"));
        if let Some(token) = bearer {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                McpError::Connect {
                    url: url.clone(),
                    reason: "bearer token is not a valid header value".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()
            .map_err(|e| McpError::Connect {
                url: url.clone(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        let transport = StreamableHttpClientTransport::with_client(
            http_client,
            StreamableHttpClientTransportConfig::with_uri(url.clone()),
        );

        let client_info = ClientInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "tandem-mcp".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
        };

        let service = tokio::time::timeout(request_timeout, client_info.serve(transport))
            .await
            .map_err(|_| McpError::Timeout(format!("handshake with {}", url)))?
            .map_err(|e| McpError::Connect {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if let Some(info) = service.peer().peer_info() {
            tracing::info!(
                server = %server_name,
                name = %info.server_info.name,
                version = %info.server_info.version,
                "connected to MCP server"
            );
        }

        Ok(Self {
            server_name,
            url,
            request_timeout,
            service,
        })
    }

    /// Change the per-request timeout (default 30s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn name(&self) -> &str {
        &self.server_name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn bounded<T, E, F>(&self, what: &str, fut: F) -> Result<T, McpError>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        tokio::time::timeout(self.request_timeout, fut)
            .await
            .map_err(|_| McpError::Timeout(format!("{} on {}", what, self.server_name)))?
            .map_err(|e| McpError::Rpc(format!("{} on {}: {}", what, self.server_name, e)))
    }

    /// List every tool the server advertises, following pagination cursors
    /// to exhaustion so filters see the full set.
    pub async fn list_tools(&self) -> Result<Vec<ToolInfo>, McpError> {
        drain_tool_pages(|cursor| async move {
            let page = self
                .bounded(
                    "tools/list",
                    self.service
                        .peer()
                        .list_tools(Some(PaginatedRequestParam { cursor })),
                )
                .await?;

            let tools = page
                .tools
                .into_iter()
                .map(|tool| ToolInfo {
                    name: tool.name.to_string(),
                    description: tool.description.map(|d| d.to_string()),
                    input_schema: Value::Object((*tool.input_schema).clone()),
                })
                .collect();

            Ok((tools, page.next_cursor))
        })
        .await
    }

    /// List tools converted to the chat-completions function format.
    pub async fn llm_tools(&self) -> Result<Vec<tandem_llm::Tool>, McpError> {
        Ok(self.list_tools().await?.iter().map(ToolInfo::to_llm_tool).collect())
    }

    /// Call a tool on this server.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<Vec<ToolContent>, McpError> {
        let arguments: Option<JsonObject> = match arguments {
            Value::Null => None,
            Value::Object(map) => Some(map),
            other => return Err(McpError::InvalidArguments(other.to_string())),
        };

        let result = self
            .bounded(
                "tools/call",
                self.service.peer().call_tool(CallToolRequestParam {
                    name: name.to_string().into(),
                    arguments,
                }),
            )
            .await?;

        if result.is_error.unwrap_or(false) {
            let text = result
                .content
                .into_iter()
                .filter_map(|c| match c.raw {
                    RawContent::Text(t) => Some(t.text),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n");
            return Err(McpError::Rpc(format!("tool '{}' reported an error: {}", name, text)));
        }

        let mut contents: Vec<ToolContent> = result
            .content
            .into_iter()
            .filter_map(map_content)
            .collect();

        if contents.is_empty() {
            if let Some(value) = result.structured_content {
                contents.push(ToolContent::Text { text: value.to_string() });
            }
        }

        Ok(contents)
    }
}

/// Accumulate tool pages until the server stops returning a cursor. `fetch`
/// takes the cursor for the next page (`None` for the first) and returns that
/// page's tools plus the follow-up cursor.
async fn drain_tool_pages<F, Fut>(mut fetch: F) -> Result<Vec<ToolInfo>, McpError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<ToolInfo>, Option<String>), McpError>>,
{
    let mut tools = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let (page, next_cursor) = fetch(cursor).await?;
        tools.extend(page);

        match next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(tools)
}

fn map_content(content: rmcp::model::Content) -> Option<ToolContent> {
    match content.raw {
        RawContent::Text(text) => Some(ToolContent::Text { text: text.text }),
        RawContent::Image(image) => Some(ToolContent::Image {
            data: image.data,
            mime_type: image.mime_type,
        }),
        RawContent::Resource(embedded) => Some(match embedded.resource {
            ResourceContents::TextResourceContents { uri, text, .. } => ToolContent::Resource {
                uri,
                text: Some(text),
            },
            ResourceContents::BlobResourceContents { uri, .. } => ToolContent::Resource {
                uri,
                text: None,
            },
        }),
        RawContent::Audio(audio) => Some(ToolContent::Text {
            text: format!("[audio: {}]", audio.mime_type),
        }),
        RawContent::ResourceLink(link) => Some(ToolContent::Resource {
            uri: link.uri,
            text: None,
        }),
    }
}

/// Tool descriptor as advertised by a server.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

impl ToolInfo {
    /// Convert to the function-tool shape chat backends expect.
    pub fn to_llm_tool(&self) -> tandem_llm::Tool {
        tandem_llm::Tool {
            tool_type: "function".to_string(),
            function: tandem_llm::types::FunctionDefinition {
                name: self.name.clone(),
                description: self.description.clone(),
                parameters: self.input_schema.clone(),
            },
        }
    }
}

/// One block of tool output.
#[derive(Debug, Clone)]
pub enum ToolContent {
    Text { text: String },
    Image { data: String, mime_type: String },
    Resource { uri: String, text: Option<String> },
}

impl ToolContent {
    pub fn render(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            Self::Image { mime_type, .. } => format!("[image: {}]", mime_type),
            Self::Resource { uri, text: Some(text) } => format!("{}\n{}", uri, text),
            Self::Resource { uri, text: None } => uri.clone(),
        }
    }

    /// Flatten a tool result into one string for the conversation transcript.
    pub fn join(contents: &[ToolContent]) -> String {
        contents.iter().map(|c| c.render()).collect::<Vec<_>>().join("\n")
    }
}
