use anyhow::Result;
use tandem_agent::AgentBuilder;

/// Expense-tracking agent backed by a local MCP server.
///
/// The chat backend is selected by `LLM_BACKEND` (azure, github, ollama, or
/// anything else for plain OpenAI); the tool server defaults to a local one.
///
/// # Running
///
/// 1. Start an MCP server with streamable-HTTP transport on
///    `http://localhost:8000/mcp/` (or set `MCP_SERVER_URL`).
/// 2. `cargo run --example expense_tracker`
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let server_url = std::env::var("MCP_SERVER_URL")
        .unwrap_or_else(|_| "http://localhost:8000/mcp/".to_string());

    let today = chrono::Local::now().format("%Y-%m-%d");

    let agent = AgentBuilder::new()
        .provider_from_env()?
        .mcp_server(server_url)
        .instructions(format!("Today's date is {}.", today))
        .build()
        .await?;

    let query = "yesterday I bought a laptop for $1200 using my visa.";
    let run = agent.run(query).await?;

    println!("{}", run.reply);
    Ok(())
}
