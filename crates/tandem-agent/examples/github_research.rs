use anyhow::Result;
use tandem_agent::AgentBuilder;
use tandem_mcp::{McpClient, ToolFilter};

/// Read-only GitHub research agent.
///
/// Connects to the GitHub MCP server, then narrows the exposed tools to the
/// three search operations so the agent cannot write to anything. The tools
/// the filter keeps out (create/update/fork operations) are reported before
/// the run.
///
/// Requires `GITHUB_TOKEN`; the same token drives the `github` chat backend.
///
/// # Running
///
/// `GITHUB_TOKEN=ghp_... cargo run --example github_research`
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("GitHub Research Agent (read-only)\n");

    let token = std::env::var("GITHUB_TOKEN")?;
    let client = McpClient::connect_with_bearer(
        "github",
        "https://api.githubcopilot.com/mcp/",
        &token,
    )
    .await?;

    let all_tools = client.list_tools().await?;
    println!("Total tools available: {}\n", all_tools.len());

    let filter = ToolFilter::allow(&["search_repositories", "search_code", "search_issues"]);

    println!("Filtered tools (read-only):");
    for tool in filter.apply(&all_tools) {
        println!("  + {}", tool.name);
    }

    let blocked = filter.blocked(&all_tools);
    if !blocked.is_empty() {
        let names: Vec<&str> = blocked.iter().take(5).map(|t| t.name.as_str()).collect();
        println!("\nBlocked tools ({}): {}...", blocked.len(), names.join(", "));
    }
    println!();

    let agent = AgentBuilder::new()
        .provider_from_env()?
        .mcp_client(client)
        .tool_filter(filter)
        .instructions("You help users research GitHub repositories. Search and analyze information.")
        .build()
        .await?;

    let query = "Find popular Python MCP server repositories";
    println!("Query: {}\n", query);

    // The one guarded call: report the failure instead of exiting with a trace.
    match agent.run(query).await {
        Ok(run) => println!("Result:\n{}\n", run.reply),
        Err(e) => println!("Error: {}\n", e),
    }

    Ok(())
}
