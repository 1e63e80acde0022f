//! MCP (tool integration) management.
//!
//! Demonstrates listing available MCPs, fetching detailed information for
//! one of them, disabling it, re-enabling it, and verifying the final
//! status round-trips.

use anyhow::Result;
use taskpilot_client::{AssistantClient, DEFAULT_BASE_URL};

#[tokio::main]
async fn main() -> Result<()> {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let client = AssistantClient::new(base_url);

    println!("Listing available MCPs...");
    let mcps = client.list_mcps().await?;
    println!("Available MCPs: {}", serde_json::to_string_pretty(&mcps)?);

    let Some(mcp) = mcps.first() else {
        println!("No MCPs configured on the server.");
        return Ok(());
    };
    let mcp_id = mcp.id.clone();

    println!("\nGetting details for MCP '{}'...", mcp_id);
    let details = client.mcp_details(&mcp_id).await?;
    println!("MCP details: {}", serde_json::to_string_pretty(&details)?);

    println!("\nDisabling MCP '{}'...", mcp_id);
    let result = client.set_mcp_status(&mcp_id, false).await?;
    println!("Disable result: {}", serde_json::to_string_pretty(&result)?);

    println!("\nRe-enabling MCP '{}'...", mcp_id);
    let result = client.set_mcp_status(&mcp_id, true).await?;
    println!("Enable result: {}", serde_json::to_string_pretty(&result)?);

    println!("\nVerifying final status of MCP '{}'...", mcp_id);
    let details = client.mcp_details(&mcp_id).await?;
    println!("Final status: {}", serde_json::to_string_pretty(&details)?);

    Ok(())
}
