//! Command-line front end for the assistant external API
//!
//! Exposes each API area as a subcommand and prints the server's responses
//! as pretty JSON, so a running assistant can be explored and driven without
//! writing a program against the client SDK.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use taskpilot_client::types::{
    AutoApproveUpdate, CreateTaskRequest, SendMessageRequest,
};
use taskpilot_client::{AssistantClient, PollConfig, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[clap(
    name = "taskpilot",
    author,
    version = "0.1.0",
    about = "Drive a task-oriented assistant through its external API"
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(
        long,
        default_value = DEFAULT_BASE_URL,
        help = "Assistant server root, e.g. http://localhost:3002"
    )]
    server_url: String,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the assistant API is reachable
    Probe,
    /// Task lifecycle operations
    Task {
        #[clap(subcommand)]
        action: TaskCommands,
    },
    /// Send a message to a task (current task when ID is omitted)
    Message {
        id: Option<String>,
        #[clap(long)]
        message: String,
        #[clap(long, help = "Image attachment (data URI); repeatable")]
        image: Vec<String>,
    },
    /// Operating modes
    Mode {
        #[clap(subcommand)]
        action: ModeCommands,
    },
    /// Configuration profiles
    Profile {
        #[clap(subcommand)]
        action: ProfileCommands,
    },
    /// Auto-approve settings
    AutoApprove {
        #[clap(subcommand)]
        action: AutoApproveCommands,
    },
    /// MCP tool integrations
    Mcp {
        #[clap(subcommand)]
        action: McpCommands,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommands {
    /// Create a new task
    Create {
        #[clap(long)]
        message: Option<String>,
        #[clap(long)]
        mode: Option<String>,
        #[clap(long)]
        profile: Option<String>,
        #[clap(long, help = "Block until the task first settles")]
        wait: bool,
    },
    /// List recent tasks
    List {
        #[clap(long)]
        limit: Option<usize>,
    },
    /// Show a task's status (current task when ID is omitted)
    Status { id: Option<String> },
    /// Show a task's conversation logs
    Logs { id: Option<String> },
    /// Approve a task awaiting approval
    Approve { id: Option<String> },
    /// Send a decision or reply to a parked task
    Respond {
        id: Option<String>,
        #[clap(long)]
        response: String,
    },
    /// Poll a task's status until it settles
    Wait {
        id: Option<String>,
        #[clap(long, default_value = "1000")]
        interval_ms: u64,
        #[clap(long, default_value = "120")]
        max_attempts: u32,
    },
}

#[derive(Subcommand, Debug)]
enum ModeCommands {
    /// List available modes
    List,
    /// Show the current mode
    Current,
    /// Make the mode with the given slug current
    Switch { slug: String },
}

#[derive(Subcommand, Debug)]
enum ProfileCommands {
    /// List available profiles
    List,
    /// Show the current profile
    Current,
    /// Make the profile with the given name current
    Switch { name: String },
}

#[derive(Subcommand, Debug)]
enum AutoApproveCommands {
    /// Show the full settings record
    Show,
    /// Turn the master switch on
    Enable,
    /// Turn the master switch off
    Disable,
    /// Update individual flags; omitted flags stay unchanged
    Set {
        #[clap(long)]
        enabled: Option<bool>,
        #[clap(long)]
        read_only: Option<bool>,
        #[clap(long)]
        write: Option<bool>,
        #[clap(long)]
        execute: Option<bool>,
        #[clap(long)]
        browser: Option<bool>,
        #[clap(long)]
        mcp: Option<bool>,
        #[clap(long)]
        resubmit: Option<bool>,
    },
}

#[derive(Subcommand, Debug)]
enum McpCommands {
    /// List MCPs with their status
    List,
    /// Show full metadata for an MCP
    Show { id: String },
    /// Enable an MCP
    Enable { id: String },
    /// Disable an MCP
    Disable { id: String },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    let client = AssistantClient::new(cli.server_url);

    match cli.command {
        Commands::Probe => {
            client.check_connection().await?;
            println!("Assistant API is reachable at {}", client.base_url());
        }
        Commands::Task { action } => handle_task_command(&client, action).await?,
        Commands::Message { id, message, image } => {
            let mut request = SendMessageRequest::new(message);
            if !image.is_empty() {
                request = request.images(image);
            }
            let task = client.send_message(id.as_deref(), &request).await?;
            print_json(&task)?;
        }
        Commands::Mode { action } => match action {
            ModeCommands::List => print_json(&client.list_modes().await?)?,
            ModeCommands::Current => print_json(&client.current_mode().await?)?,
            ModeCommands::Switch { slug } => print_json(&client.switch_mode(slug).await?)?,
        },
        Commands::Profile { action } => match action {
            ProfileCommands::List => print_json(&client.list_profiles().await?)?,
            ProfileCommands::Current => print_json(&client.current_profile().await?)?,
            ProfileCommands::Switch { name } => print_json(&client.switch_profile(name).await?)?,
        },
        Commands::AutoApprove { action } => match action {
            AutoApproveCommands::Show => print_json(&client.auto_approve_settings().await?)?,
            AutoApproveCommands::Enable => {
                print_json(&client.set_auto_approve_enabled(true).await?)?
            }
            AutoApproveCommands::Disable => {
                print_json(&client.set_auto_approve_enabled(false).await?)?
            }
            AutoApproveCommands::Set {
                enabled,
                read_only,
                write,
                execute,
                browser,
                mcp,
                resubmit,
            } => {
                let update = AutoApproveUpdate {
                    auto_approval_enabled: enabled,
                    always_allow_read_only: read_only,
                    always_allow_write: write,
                    always_allow_execute: execute,
                    always_allow_browser: browser,
                    always_allow_mcp: mcp,
                    always_approve_resubmit: resubmit,
                };
                print_json(&client.update_auto_approve(&update).await?)?;
            }
        },
        Commands::Mcp { action } => match action {
            McpCommands::List => print_json(&client.list_mcps().await?)?,
            McpCommands::Show { id } => print_json(&client.mcp_details(&id).await?)?,
            McpCommands::Enable { id } => print_json(&client.set_mcp_status(&id, true).await?)?,
            McpCommands::Disable { id } => print_json(&client.set_mcp_status(&id, false).await?)?,
        },
    }

    Ok(())
}

async fn handle_task_command(client: &AssistantClient, action: TaskCommands) -> Result<()> {
    match action {
        TaskCommands::Create {
            message,
            mode,
            profile,
            wait,
        } => {
            let request = CreateTaskRequest {
                message,
                mode,
                profile,
                wait_for_completion: wait.then_some(true),
            };
            log::info!("creating task against {}", client.base_url());
            print_json(&client.create_task(&request).await?)?;
        }
        TaskCommands::List { limit } => print_json(&client.list_tasks(limit).await?)?,
        TaskCommands::Status { id } => print_json(&client.task_status(id.as_deref()).await?)?,
        TaskCommands::Logs { id } => print_json(&client.task_logs(id.as_deref()).await?)?,
        TaskCommands::Approve { id } => print_json(&client.approve(id.as_deref()).await?)?,
        TaskCommands::Respond { id, response } => {
            print_json(&client.respond(id.as_deref(), response).await?)?
        }
        TaskCommands::Wait {
            id,
            interval_ms,
            max_attempts,
        } => {
            let config = PollConfig {
                interval: Duration::from_millis(interval_ms),
                max_attempts,
            };
            print_json(&client.wait_for_attention(id.as_deref(), &config).await?)?;
        }
    }
    Ok(())
}
