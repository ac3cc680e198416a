use crate::client::{McpClient, ToolContent, ToolInfo};
use crate::error::McpError;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A connected server plus the tools it advertised at registration time.
struct Entry {
    client: Arc<McpClient>,
    tools: Vec<ToolInfo>,
}

/// Registry of connected MCP servers.
///
/// Aggregates tool listings in registration order and routes calls to the
/// first server advertising the requested tool. The tool index is captured
/// when a server is added, so routing does not re-list on every call.
pub struct McpRegistry {
    entries: Arc<RwLock<Vec<Entry>>>,
}

impl Default for McpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl McpRegistry {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a connected server, snapshotting its tool list.
    pub async fn add(&self, client: McpClient) -> Result<(), McpError> {
        let tools = client.list_tools().await?;
        tracing::debug!(server = %client.name(), tools = tools.len(), "registered MCP server");

        let mut entries = self.entries.write().await;
        entries.push(Entry {
            client: Arc::new(client),
            tools,
        });
        Ok(())
    }

    /// All tools from all servers, `(server_name, tools)` per server, in
    /// registration order.
    pub async fn list_all(&self) -> Vec<(String, Vec<ToolInfo>)> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .map(|e| (e.client.name().to_string(), e.tools.clone()))
            .collect()
    }

    /// Aggregated flat tool list, in registration + server order.
    pub async fn tools(&self) -> Vec<ToolInfo> {
        let entries = self.entries.read().await;
        entries.iter().flat_map(|e| e.tools.iter().cloned()).collect()
    }

    /// Aggregated tools in chat-completions function format.
    pub async fn llm_tools(&self) -> Vec<tandem_llm::Tool> {
        self.tools().await.iter().map(ToolInfo::to_llm_tool).collect()
    }

    /// Call `tool_name` on the first server that advertises it.
    pub async fn call(&self, tool_name: &str, arguments: Value) -> Result<Vec<ToolContent>, McpError> {
        let client = {
            let entries = self.entries.read().await;
            entries
                .iter()
                .find(|e| e.tools.iter().any(|t| t.name == tool_name))
                .map(|e| Arc::clone(&e.client))
        };

        match client {
            Some(client) => client.call_tool(tool_name, arguments).await,
            None => Err(McpError::ToolNotFound(tool_name.to_string())),
        }
    }

    pub async fn server_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_registry_has_no_tools() {
        let registry = McpRegistry::new();
        assert_eq!(registry.server_count().await, 0);
        assert!(registry.tools().await.is_empty());
        assert!(registry.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn call_on_empty_registry_is_tool_not_found() {
        let registry = McpRegistry::new();
        let err = registry
            .call("get_forecast", serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, McpError::ToolNotFound(name) if name == "get_forecast"));
    }
}
