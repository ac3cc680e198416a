//! Builder wiring a chat backend, MCP servers and a tool filter into an Agent.

use crate::agent::{Agent, AgentConfig};
use anyhow::{Context, Result};
use std::sync::Arc;
use tandem_llm::{ChatClient, ProviderConfig};
use tandem_mcp::{McpClient, McpRegistry, ToolFilter};

struct ServerSpec {
    url: String,
    bearer: Option<String>,
}

/// Builder for [`Agent`].
///
/// # Example
///
/// ```rust,no_run
/// use tandem_agent::AgentBuilder;
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let agent = AgentBuilder::new()
///     .provider_from_env()?
///     .mcp_server("http://localhost:8000/mcp/")
///     .instructions("You help users track expenses.")
///     .build()
///     .await?;
///
/// let run = agent.run("What did I spend yesterday?").await?;
/// println!("{}", run.reply);
/// # Ok(())
/// # }
/// ```
pub struct AgentBuilder {
    provider: Option<ProviderConfig>,
    client: Option<(Arc<dyn ChatClient>, String)>,
    servers: Vec<ServerSpec>,
    clients: Vec<McpClient>,
    filter: Option<ToolFilter>,
    instructions: Option<String>,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            client: None,
            servers: Vec::new(),
            clients: Vec::new(),
            filter: None,
            instructions: None,
            config: AgentConfig::default(),
        }
    }

    /// Select the chat backend from `LLM_BACKEND` and its companion
    /// environment variables.
    pub fn provider_from_env(mut self) -> Result<Self> {
        self.provider = Some(ProviderConfig::from_env()?);
        Ok(self)
    }

    /// Use an explicit provider configuration.
    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use an already-constructed chat client addressing `model`.
    pub fn chat_client(mut self, client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        self.client = Some((client, model.into()));
        self
    }

    /// Add an MCP server by URL. May be called multiple times.
    pub fn mcp_server(mut self, url: impl Into<String>) -> Self {
        self.servers.push(ServerSpec {
            url: url.into(),
            bearer: None,
        });
        self
    }

    /// Add an MCP server that requires a bearer token.
    pub fn mcp_server_with_bearer(
        mut self,
        url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        self.servers.push(ServerSpec {
            url: url.into(),
            bearer: Some(token.into()),
        });
        self
    }

    /// Add MCP servers from a comma-separated URL list.
    pub fn mcp_servers(mut self, urls: impl AsRef<str>) -> Self {
        for url in urls.as_ref().split(',').map(str::trim).filter(|u| !u.is_empty()) {
            self.servers.push(ServerSpec {
                url: url.to_string(),
                bearer: None,
            });
        }
        self
    }

    /// Add an already-connected MCP client.
    pub fn mcp_client(mut self, client: McpClient) -> Self {
        self.clients.push(client);
        self
    }

    /// Restrict the exposed tools to a literal name allow-list.
    pub fn allow_tools(mut self, names: &[&str]) -> Self {
        self.filter = Some(ToolFilter::allow(names));
        self
    }

    /// Apply a pre-built filter.
    pub fn tool_filter(mut self, filter: ToolFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// System prompt for the agent.
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = Some(max_tokens);
        self
    }

    pub fn max_turns(mut self, max_turns: usize) -> Self {
        self.config.max_turns = max_turns;
        self
    }

    /// Connect to the configured MCP servers and assemble the agent.
    pub async fn build(self) -> Result<Agent> {
        let (client, model) = match (self.client, self.provider) {
            (Some((client, model)), _) => (client, model),
            (None, provider) => {
                // No explicit client: resolve from the environment.
                let provider = match provider {
                    Some(p) => p,
                    None => ProviderConfig::from_env()?,
                };
                let model = provider.model().to_string();
                (provider.build_client()?, model)
            }
        };

        let registry = McpRegistry::new();

        for mcp_client in self.clients {
            registry.add(mcp_client).await?;
        }

        for (idx, spec) in self.servers.iter().enumerate() {
            let name = format!("mcp-server-{}", idx);
            let mcp_client = match &spec.bearer {
                Some(token) => {
                    McpClient::connect_with_bearer(name.clone(), spec.url.clone(), token).await
                }
                None => McpClient::connect(name.clone(), spec.url.clone()).await,
            }
            .with_context(|| format!("Failed to connect to MCP server: {}", spec.url))?;
            registry.add(mcp_client).await?;
        }

        let all_tools = registry.tools().await;
        let exposed = match &self.filter {
            Some(filter) => filter.apply_owned(&all_tools),
            None => all_tools,
        };
        let tools = exposed.iter().map(|t| t.to_llm_tool()).collect();

        Ok(Agent::new(
            client,
            Arc::new(registry),
            model,
            tools,
            self.instructions,
            self.config,
        ))
    }
}
