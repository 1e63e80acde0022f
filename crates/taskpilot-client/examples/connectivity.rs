//! Connectivity probe.
//!
//! Checks that the assistant's external API is reachable before any other
//! example is worth running. On failure the error itself carries the
//! server-configuration checklist.

use taskpilot_client::{AssistantClient, DEFAULT_BASE_URL};

#[tokio::main]
async fn main() {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let client = AssistantClient::new(base_url);

    println!("Testing connection to {}...", client.base_url());
    match client.check_connection().await {
        Ok(()) => println!("Assistant API is reachable."),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
