use tandem_llm::{Message, ToolCall};

/// Conversation state for one agent run: the ordered transcript.
#[derive(Debug, Clone, Default)]
pub struct AgentState {
    messages: Vec<Message>,
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Tool calls on the trailing assistant message, if any.
    pub fn pending_tool_calls(&self) -> Vec<ToolCall> {
        match self.last_message() {
            Some(Message::AI { tool_calls: Some(calls), .. }) => calls.clone(),
            _ => Vec::new(),
        }
    }

    pub fn has_pending_tool_calls(&self) -> bool {
        matches!(
            self.last_message(),
            Some(Message::AI { tool_calls: Some(calls), .. }) if !calls.is_empty()
        )
    }

    pub fn add_tool_result(&mut self, tool_call_id: String, result: String) {
        self.messages.push(Message::tool_result(tool_call_id, result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_tool_calls_only_on_trailing_ai_message() {
        let mut state = AgentState::new();
        state.push(Message::human("hi"));
        assert!(!state.has_pending_tool_calls());

        state.push(Message::ai_with_tools(vec![ToolCall::new("c1", "echo", "{}")]));
        assert!(state.has_pending_tool_calls());
        assert_eq!(state.pending_tool_calls().len(), 1);

        state.add_tool_result("c1".to_string(), "done".to_string());
        assert!(!state.has_pending_tool_calls());
    }
}
