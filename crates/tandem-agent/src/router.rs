use crate::state::AgentState;

/// What the agent loop does after a model turn:
/// execute tools if the model asked for them, otherwise finish.
/// After a tool turn control always returns to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Tools,
    Done,
}

pub fn after_model_turn(state: &AgentState) -> NextStep {
    if state.has_pending_tool_calls() {
        NextStep::Tools
    } else {
        NextStep::Done
    }
}
