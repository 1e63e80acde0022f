//! Advanced task management.
//!
//! Demonstrates listing recent tasks, then fetching status and logs of a
//! specific task and sending it a message, all addressed by task id rather
//! than through the current-task endpoints.

use anyhow::Result;
use taskpilot_client::types::SendMessageRequest;
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

    println!("Listing recent tasks...");
    let tasks = client.list_tasks(Some(5)).await?;
    println!("Recent tasks: {}", serde_json::to_string_pretty(&tasks)?);

    let Some(task) = tasks.first() else {
        println!("No tasks on the server yet; create one first (see basic_task).");
        return Ok(());
    };
    let task_id = task.id.clone();

    pause(&format!("get status for task {}", task_id));

    println!("\nGetting status for task {}...", task_id);
    let status = client.task_status(Some(&task_id)).await?;
    println!("Task status: {}", serde_json::to_string_pretty(&status)?);

    pause(&format!("get logs for task {}", task_id));

    println!("\nGetting logs for task {}...", task_id);
    let logs = client.task_logs(Some(&task_id)).await?;
    println!("Task logs: {}", serde_json::to_string_pretty(&logs)?);

    pause(&format!("send message to task {}", task_id));

    println!("\nSending message to task {}...", task_id);
    let result = client
        .send_message(
            Some(&task_id),
            &SendMessageRequest::new("This is a message to a specific task!"),
        )
        .await?;
    println!("Message sent: {}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
