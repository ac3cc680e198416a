use anyhow::Result;
use tandem_agent::AgentBuilder;

/// Documentation assistant backed by the Microsoft Learn MCP server.
///
/// # Running
///
/// `cargo run --example docs_assistant`
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let agent = AgentBuilder::new()
        .provider_from_env()?
        .mcp_server("https://learn.microsoft.com/api/mcp")
        .instructions("You help with Microsoft documentation questions.")
        .build()
        .await?;

    let run = agent
        .run("How to create an Azure storage account using az cli?")
        .await?;

    println!("{}", run.reply);
    Ok(())
}
