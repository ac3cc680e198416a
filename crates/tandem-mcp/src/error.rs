use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("failed to connect to MCP server {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("MCP request timed out: {0}")]
    Timeout(String),

    #[error("MCP request failed: {0}")]
    Rpc(String),

    #[error("tool '{0}' not found on any connected server")]
    ToolNotFound(String),

    #[error("tool arguments must be a JSON object, got: {0}")]
    InvalidArguments(String),
}
