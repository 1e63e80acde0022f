//! Task approval.
//!
//! Creates a task that will ask for approval, polls its status until it
//! parks, approves it, and drives it to a terminal state. The sequence runs
//! twice: first addressing the task by id, then through the current-task
//! endpoints.

use anyhow::Result;
use taskpilot_client::types::{CreateTaskRequest, TaskStatus};
use taskpilot_client::{AssistantClient, PollConfig, DEFAULT_BASE_URL};

fn pause(prompt: &str) {
    if std::env::var_os("TASKPILOT_NO_PAUSE").is_some() {
        return;
    }
    println!("\nPress Enter to {}...", prompt);
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}

async fn drive_to_terminal(client: &AssistantClient, task: Option<&str>) -> Result<()> {
    let poll = PollConfig::default();
    loop {
        let status = client.wait_for_attention(task, &poll).await?;
        println!("Current status: {}", serde_json::to_string_pretty(&status)?);

        match status.status {
            TaskStatus::NeedsApproval => {
                pause("approve the task");
                let result = client.approve(task).await?;
                println!("Approval result: {}", serde_json::to_string_pretty(&result)?);
            }
            TaskStatus::NeedsInput => {
                pause("send a go-ahead reply");
                let result = client.respond(task, "go ahead").await?;
                println!("Response result: {}", serde_json::to_string_pretty(&result)?);
            }
            TaskStatus::Completed | TaskStatus::Error => return Ok(()),
            TaskStatus::InProgress => unreachable!("wait_for_attention only returns settled tasks"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let client = AssistantClient::new(base_url);

    println!("Testing task approval with a task id...");
    pause("create a new task");

    let task = client
        .create_task(
            &CreateTaskRequest::with_message(
                "Create a script that prints hello world and run it",
            )
            .mode("architect"),
        )
        .await?;
    println!("Task created: {}", serde_json::to_string_pretty(&task)?);
    drive_to_terminal(&client, Some(&task.id)).await?;

    println!("\nNow testing task approval without a task id...");
    pause("create another task");

    let task = client
        .create_task(
            &CreateTaskRequest::with_message(
                "Create a script that prints hello world and run it",
            )
            .mode("architect"),
        )
        .await?;
    println!("Task created: {}", serde_json::to_string_pretty(&task)?);
    drive_to_terminal(&client, None).await?;

    Ok(())
}
