//! # Tandem — chat LLMs paired with MCP tools
//!
//! Tandem wires chat-oriented LLM backends to Model Context Protocol (MCP)
//! tool servers:
//!
//! - **Backend selection from the environment**: one `LLM_BACKEND` variable
//!   picks Azure OpenAI, GitHub Models, Ollama, or OpenAI.
//! - **MCP over streamable HTTP**: connect, discover tools, call them.
//! - **Tool filtering**: expose only an allow-list of tool names to the agent.
//! - **Single-shot agent**: one query in, tool calls executed, one reply out.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use tandem::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let agent = AgentBuilder::new()
//!         .provider_from_env()?
//!         .mcp_server("http://localhost:8000/mcp/")
//!         .allow_tools(&["search_repositories", "search_code"])
//!         .instructions("You help users research repositories.")
//!         .build()
//!         .await?;
//!
//!     let run = agent.run("Find popular MCP server repositories").await?;
//!     println!("{}", run.reply);
//!     Ok(())
//! }
//! ```
//!
//! ## Crates
//!
//! - **tandem-llm**: provider-agnostic chat client (OpenAI-compatible + Azure)
//! - **tandem-mcp**: MCP client, multi-server registry, tool filter
//! - **tandem-agent**: the tool-calling agent loop and builder

pub use tandem_agent::{Agent, AgentBuilder, AgentConfig, AgentRun};
pub use tandem_llm::{
    AzureOpenAIClient, Backend, ChatClient, ChatOptions, ChatRequest, ChatResponse, Message,
    OpenAIClient, ProviderConfig, TokenUsage, Tool, ToolCall, ToolChoice,
};
pub use tandem_mcp::{McpClient, McpError, McpRegistry, ToolContent, ToolFilter, ToolInfo};

pub mod prelude;
