//! Prelude module for convenient imports
//!
//! ```rust
//! use tandem::prelude::*;
//! ```

pub use crate::{
    Agent, AgentBuilder, AgentConfig, AgentRun,
    Backend, ChatClient, ChatOptions, ChatRequest, ChatResponse, ProviderConfig,
    Message, Tool, ToolCall, ToolChoice,
    McpClient, McpError, McpRegistry, ToolContent, ToolFilter, ToolInfo,
};
