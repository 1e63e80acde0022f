//! Mode and profile management.
//!
//! Demonstrates listing modes, reading and switching the current mode, then
//! the same sequence for configuration profiles.

use anyhow::Result;
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

    println!("Listing available modes...");
    let modes = client.list_modes().await?;
    println!("Available modes: {}", serde_json::to_string_pretty(&modes)?);

    pause("get current mode");

    println!("\nGetting current mode...");
    let current_mode = client.current_mode().await?;
    println!("Current mode: {}", serde_json::to_string_pretty(&current_mode)?);

    pause("switch to architect mode");

    println!("\nSwitching to architect mode...");
    let result = client.switch_mode("architect").await?;
    println!("Switch result: {}", serde_json::to_string_pretty(&result)?);

    pause("list profiles");

    println!("\nListing available profiles...");
    let profiles = client.list_profiles().await?;
    println!("Available profiles: {}", serde_json::to_string_pretty(&profiles)?);

    pause("get current profile");

    println!("\nGetting current profile...");
    let current_profile = client.current_profile().await?;
    println!(
        "Current profile: {}",
        serde_json::to_string_pretty(&current_profile)?
    );

    // Switch to the first profile that is not current, if there is one.
    if let Some(other) = profiles.iter().find(|p| p.name != current_profile.name) {
        pause("switch profile");

        println!("\nSwitching to profile '{}'...", other.name);
        let result = client.switch_profile(&other.name).await?;
        println!("Switch result: {}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
