//! Basic task creation and message sending.
//!
//! Demonstrates creating a new task, sending a follow-up message to the
//! current task, and fetching the current task's status and conversation
//! logs.

use anyhow::Result;
use taskpilot_client::types::{CreateTaskRequest, SendMessageRequest};
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

    println!("Creating new task...");
    let task = client
        .create_task(
            &CreateTaskRequest::with_message("Hello! Let's start a new task.")
                .mode("architect")
                .wait_for_completion(),
        )
        .await?;
    println!("Task created: {}", serde_json::to_string_pretty(&task)?);

    pause("send follow-up message");

    println!("\nSending follow-up message...");
    let result = client
        .send_message(
            None,
            &SendMessageRequest::new(
                "Can you help me with a script that prints a poem about a cat?",
            ),
        )
        .await?;
    println!("Message sent: {}", serde_json::to_string_pretty(&result)?);

    pause("check task status");

    println!("\nChecking task status...");
    let status = client.task_status(None).await?;
    println!("Current status: {}", serde_json::to_string_pretty(&status)?);

    pause("get conversation logs");

    println!("\nGetting conversation logs...");
    let logs = client.task_logs(None).await?;
    println!("Conversation logs: {}", serde_json::to_string_pretty(&logs)?);

    Ok(())
}
