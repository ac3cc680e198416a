use serde::{Deserialize, Serialize};
use super::tool::ToolCall;

/// Conversation message, tagged by role.
///
/// Serializes to the OpenAI chat-completions wire shape. Content is plain
/// text; the tool servers and models these crates talk to are text-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// System prompt (instructions)
    System { content: String },

    /// User message
    #[serde(rename = "user")]
    Human { content: String },

    /// Assistant message: text reply, tool calls, or both
    #[serde(rename = "assistant")]
    AI {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },

    /// Result of a tool execution, keyed back to the call that produced it
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System { content: content.into() }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::Human { content: content.into() }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::AI {
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    pub fn ai_with_tools(tool_calls: Vec<ToolCall>) -> Self {
        Self::AI {
            content: None,
            tool_calls: Some(tool_calls),
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }

    pub fn role(&self) -> &str {
        match self {
            Self::System { .. } => "system",
            Self::Human { .. } => "user",
            Self::AI { .. } => "assistant",
            Self::Tool { .. } => "tool",
        }
    }

    /// Text content of the message, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::System { content } | Self::Human { content } | Self::Tool { content, .. } => {
                Some(content)
            }
            Self::AI { content, .. } => content.as_deref(),
        }
    }
}
