//! Auto-approve settings management.
//!
//! Demonstrates reading the current auto-approve settings, applying an
//! update, verifying the result, and toggling the master switch off again.

use anyhow::Result;
use taskpilot_client::types::AutoApproveUpdate;
use taskpilot_client::{AssistantClient, DEFAULT_BASE_URL};

fn pause(prompt: &str) {
    if std::env::var_os("TASKPILOT_NO_PAUSE").is_some() {
        return;
    }
    println!("\nPress Enter to {}...", prompt);
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}

#[tokio::main]
async fn main() -> Result<()> {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let client = AssistantClient::new(base_url);

    println!("Getting current auto-approve settings...");
    let settings = client.auto_approve_settings().await?;
    println!("Current settings: {}", serde_json::to_string_pretty(&settings)?);

    pause("update settings");

    println!("\nUpdating auto-approve settings...");
    let update = AutoApproveUpdate {
        auto_approval_enabled: Some(true),
        always_allow_read_only: Some(true),
        always_allow_write: Some(false),
        always_allow_execute: Some(false),
        always_allow_browser: Some(true),
        always_allow_mcp: Some(false),
        always_approve_resubmit: Some(true),
    };
    let result = client.update_auto_approve(&update).await?;
    println!("Update result: {}", serde_json::to_string_pretty(&result)?);

    pause("verify settings");

    println!("\nVerifying updated settings...");
    let settings = client.auto_approve_settings().await?;
    println!("Updated settings: {}", serde_json::to_string_pretty(&settings)?);

    pause("disable auto-approve");

    println!("\nDisabling auto-approve...");
    let result = client.set_auto_approve_enabled(false).await?;
    println!("Toggle result: {}", serde_json::to_string_pretty(&result)?);

    pause("run the final verification");

    println!("\nFinal settings check...");
    let settings = client.auto_approve_settings().await?;
    println!("Final settings: {}", serde_json::to_string_pretty(&settings)?);

    Ok(())
}
