pub mod types;
pub mod traits;
pub mod openai;
pub mod azure;
pub mod provider;

pub use traits::{ChatClient, ChatRequest, ChatResponse, ChatOptions, TokenUsage};
pub use openai::OpenAIClient;
pub use azure::AzureOpenAIClient;
pub use provider::{Backend, ProviderConfig};
pub use types::{Message, Tool, ToolCall, ToolChoice};
