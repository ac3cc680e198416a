pub mod client;
pub mod error;
pub mod filter;
pub mod registry;

pub use client::{McpClient, ToolContent, ToolInfo};
pub use error::McpError;
pub use filter::ToolFilter;
pub use registry::McpRegistry;
