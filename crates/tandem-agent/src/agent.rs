use crate::router::{after_model_turn, NextStep};
use crate::state::AgentState;
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tandem_llm::{ChatClient, ChatOptions, ChatRequest, Message, Tool, ToolChoice};
use tandem_mcp::{McpRegistry, ToolContent};

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Guardrail on model turns per run. A turn is one chat completion.
    pub max_turns: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            temperature: None,
            max_tokens: None,
            max_turns: 10,
        }
    }
}

/// A chat model paired with a set of MCP tools and a system prompt.
///
/// One `run` is one query: the model is called, any tool calls it issues are
/// executed against the registry, results are appended to the transcript, and
/// the loop repeats until the model answers without tools.
pub struct Agent {
    client: Arc<dyn ChatClient>,
    registry: Arc<McpRegistry>,
    model: String,
    tools: Vec<Tool>,
    instructions: Option<String>,
    config: AgentConfig,
}

/// Result of a completed agent run.
#[derive(Debug, Clone)]
pub struct AgentRun {
    /// The model's final text reply.
    pub reply: String,
    /// Full transcript including system prompt, tool calls and tool results.
    pub transcript: Vec<Message>,
    /// Model turns consumed.
    pub turns: usize,
}

impl Agent {
    pub(crate) fn new(
        client: Arc<dyn ChatClient>,
        registry: Arc<McpRegistry>,
        model: String,
        tools: Vec<Tool>,
        instructions: Option<String>,
        config: AgentConfig,
    ) -> Self {
        Self {
            client,
            registry,
            model,
            tools,
            instructions,
            config,
        }
    }

    pub fn builder() -> crate::builder::AgentBuilder {
        crate::builder::AgentBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Tools the model will be offered, post-filter.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn registry(&self) -> &McpRegistry {
        &self.registry
    }

    /// Run one query to completion and return the final reply.
    pub async fn run(&self, query: impl Into<String>) -> Result<AgentRun> {
        let mut state = AgentState::new();
        if let Some(instructions) = &self.instructions {
            state.push(Message::system(instructions.clone()));
        }
        state.push(Message::human(query));

        let mut turns = 0;

        loop {
            if turns >= self.config.max_turns {
                anyhow::bail!(
                    "agent stopped after {} model turns without a final reply",
                    self.config.max_turns
                );
            }

            let response = self.model_turn(&state).await?;
            state.push(response.to_message());
            turns += 1;

            match after_model_turn(&state) {
                NextStep::Done => {
                    let reply = response.content.unwrap_or_default();
                    tracing::info!(turns, "agent run finished");
                    return Ok(AgentRun {
                        reply,
                        transcript: state.into_messages(),
                        turns,
                    });
                }
                NextStep::Tools => {
                    self.tool_turn(&mut state).await?;
                }
            }
        }
    }

    async fn model_turn(&self, state: &AgentState) -> Result<tandem_llm::ChatResponse> {
        let mut options = ChatOptions::new();
        if !self.tools.is_empty() {
            options = options
                .tools(self.tools.clone())
                .tool_choice(ToolChoice::auto());
        }
        if let Some(temp) = self.config.temperature {
            options = options.temperature(temp);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            options = options.max_tokens(max_tokens);
        }

        let request =
            ChatRequest::new(self.model.clone(), state.messages().to_vec()).with_options(options);

        self.client.chat(request).await
    }

    /// Execute every pending tool call. Failures do not abort the run; the
    /// error text goes back to the model as the tool result.
    async fn tool_turn(&self, state: &mut AgentState) -> Result<()> {
        for call in state.pending_tool_calls() {
            let start = Instant::now();
            let name = call.function.name.clone();

            let outcome = match call.arguments_value() {
                Ok(args) => self
                    .registry
                    .call(&name, args)
                    .await
                    .map(|contents| ToolContent::join(&contents))
                    .map_err(|e| e.to_string()),
                Err(e) => Err(format!("invalid tool arguments: {}", e)),
            };

            match outcome {
                Ok(result) => {
                    tracing::info!(
                        tool = %name,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "tool call succeeded"
                    );
                    state.add_tool_result(call.id, result);
                }
                Err(error) => {
                    tracing::warn!(tool = %name, error = %error, "tool call failed");
                    state.add_tool_result(call.id, format!("Tool execution failed: {}", error));
                }
            }
        }

        Ok(())
    }
}
