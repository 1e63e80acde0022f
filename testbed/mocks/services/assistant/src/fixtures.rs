use std::collections::{HashMap, VecDeque};

use chrono::Utc;
use taskpilot_api_types::{
    AutoApproveSettings, CreateTaskRequest, LogEntry, McpDetails, McpStatus, Mode, Profile, Task,
    TaskStatus,
};
use uuid::Uuid;

/// Initial catalog data and scripted task behavior for the mock.
#[derive(Debug, Clone)]
pub struct AssistantFixture {
    pub modes: Vec<Mode>,
    /// Slug of the initially current mode.
    pub current_mode: String,
    pub profiles: Vec<Profile>,
    /// Name of the initially current profile.
    pub current_profile: String,
    pub auto_approve: AutoApproveSettings,
    pub mcps: Vec<McpDetails>,
    /// Status sequence each newly created task walks through, one entry per
    /// status check. The final entry is sticky.
    pub task_script: Vec<TaskStatus>,
    /// `lastMessage` a scripted task reports once it completes.
    pub completion_message: Option<String>,
}

impl AssistantFixture {
    pub fn create_test_fixture() -> Self {
        Self {
            modes: vec![
                Mode {
                    slug: "code".to_string(),
                    name: "Code".to_string(),
                },
                Mode {
                    slug: "architect".to_string(),
                    name: "Architect".to_string(),
                },
                Mode {
                    slug: "ask".to_string(),
                    name: "Ask".to_string(),
                },
            ],
            current_mode: "code".to_string(),
            profiles: vec![
                Profile {
                    name: "default".to_string(),
                },
                Profile {
                    name: "remote-llm".to_string(),
                },
            ],
            current_profile: "default".to_string(),
            auto_approve: AutoApproveSettings {
                auto_approval_enabled: false,
                always_allow_read_only: false,
                always_allow_write: false,
                always_allow_execute: false,
                always_allow_browser: false,
                always_allow_mcp: false,
                always_approve_resubmit: false,
            },
            mcps: vec![
                McpDetails {
                    id: "github".to_string(),
                    status: McpStatus::Enabled,
                    name: Some("GitHub".to_string()),
                    description: Some("Repository browsing and issue management".to_string()),
                    tools: Some(vec![
                        "search_issues".to_string(),
                        "create_pull_request".to_string(),
                    ]),
                },
                McpDetails {
                    id: "filesystem".to_string(),
                    status: McpStatus::Enabled,
                    name: Some("Filesystem".to_string()),
                    description: None,
                    tools: Some(vec!["read_file".to_string(), "write_file".to_string()]),
                },
            ],
            task_script: vec![TaskStatus::InProgress, TaskStatus::Completed],
            completion_message: Some("All done.".to_string()),
        }
    }
}

/// One tracked task: its scripted status sequence, conversation, and the
/// poll counter the integration tests assert on.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: String,
    /// Front is the current status; advancing stops at the final entry.
    pub statuses: VecDeque<TaskStatus>,
    pub completion_message: Option<String>,
    pub logs: Vec<LogEntry>,
    pub status_checks: u32,
}

impl TaskRecord {
    fn new(id: String, script: Vec<TaskStatus>, completion_message: Option<String>) -> Self {
        let statuses = if script.is_empty() {
            VecDeque::from(vec![TaskStatus::Completed])
        } else {
            VecDeque::from(script)
        };
        Self {
            id,
            statuses,
            completion_message,
            logs: Vec::new(),
            status_checks: 0,
        }
    }

    fn current_status(&self) -> TaskStatus {
        *self.statuses.front().expect("status queue is never empty")
    }

    pub fn view(&self) -> Task {
        let status = self.current_status();
        Task {
            id: self.id.clone(),
            status,
            last_message: if status == TaskStatus::Completed {
                self.completion_message.clone()
            } else {
                None
            },
        }
    }

    /// One status check: report the current status, then advance the script
    /// so the next check sees the next entry. Only `in_progress` advances;
    /// attention states persist until the operator responds, and the final
    /// entry is sticky.
    pub fn check_status(&mut self) -> Task {
        self.status_checks += 1;
        let view = self.view();
        if view.status == TaskStatus::InProgress && self.statuses.len() > 1 {
            self.statuses.pop_front();
        }
        view
    }

    /// Skip ahead to the first terminal-or-attention status
    /// (wait_for_completion).
    pub fn settle(&mut self) -> Task {
        while self.current_status() == TaskStatus::InProgress && self.statuses.len() > 1 {
            self.statuses.pop_front();
        }
        self.view()
    }

    fn push_log(&mut self, role: &str, content: String) {
        self.logs.push(LogEntry {
            role: role.to_string(),
            content,
            timestamp: Some(Utc::now()),
        });
    }
}

/// Mutable world state behind the mock's routes.
#[derive(Debug)]
pub struct AssistantState {
    pub tasks: HashMap<String, TaskRecord>,
    /// Creation order, oldest first.
    pub task_order: Vec<String>,
    pub current_task: Option<String>,
    pub modes: Vec<Mode>,
    pub current_mode: String,
    pub profiles: Vec<Profile>,
    pub current_profile: String,
    pub auto_approve: AutoApproveSettings,
    pub mcps: Vec<McpDetails>,
    pub next_task_script: Vec<TaskStatus>,
    pub completion_message: Option<String>,
}

impl AssistantState {
    pub fn from_fixture(fixture: AssistantFixture) -> Self {
        Self {
            tasks: HashMap::new(),
            task_order: Vec::new(),
            current_task: None,
            modes: fixture.modes,
            current_mode: fixture.current_mode,
            profiles: fixture.profiles,
            current_profile: fixture.current_profile,
            auto_approve: fixture.auto_approve,
            mcps: fixture.mcps,
            next_task_script: fixture.task_script,
            completion_message: fixture.completion_message,
        }
    }

    /// Replace the script applied to tasks created from here on.
    pub fn script_next_tasks(
        &mut self,
        statuses: Vec<TaskStatus>,
        completion_message: Option<String>,
    ) {
        self.next_task_script = statuses;
        self.completion_message = completion_message;
    }

    pub fn create_task(&mut self, request: &CreateTaskRequest) -> Task {
        let id = format!("task-{}", Uuid::new_v4());
        let mut record = TaskRecord::new(
            id.clone(),
            self.next_task_script.clone(),
            self.completion_message.clone(),
        );
        if let Some(message) = &request.message {
            record.push_log("user", message.clone());
        }
        let view = if request.wait_for_completion.unwrap_or(false) {
            record.settle()
        } else {
            record.view()
        };
        self.tasks.insert(id.clone(), record);
        self.task_order.push(id.clone());
        self.current_task = Some(id);
        view
    }

    /// Most recent first, optionally truncated.
    pub fn list_tasks(&self, limit: Option<usize>) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .task_order
            .iter()
            .rev()
            .filter_map(|id| self.tasks.get(id))
            .map(TaskRecord::view)
            .collect();
        if let Some(limit) = limit {
            tasks.truncate(limit);
        }
        tasks
    }

    /// Resolve an explicit id, or the current-task pointer when `None`.
    pub fn resolve_task(&mut self, task: Option<&str>) -> Option<&mut TaskRecord> {
        let id = match task {
            Some(id) => id.to_string(),
            None => self.current_task.clone()?,
        };
        self.tasks.get_mut(&id)
    }

    /// Append a user message to a task's conversation.
    pub fn send_message(&mut self, task: Option<&str>, message: String) -> Option<Task> {
        let record = self.resolve_task(task)?;
        record.push_log("user", message);
        Some(record.view())
    }

    /// Apply a decision to a task parked on the operator. Returns `Err(())`
    /// when the task is not waiting for input or approval.
    pub fn respond(&mut self, task: Option<&str>, response: String) -> Option<Result<Task, ()>> {
        let record = self.resolve_task(task)?;
        if !record.current_status().needs_attention() {
            return Some(Err(()));
        }
        record.push_log("user", response);
        if record.statuses.len() > 1 {
            record.statuses.pop_front();
        } else {
            record.statuses[0] = TaskStatus::Completed;
        }
        Some(Ok(record.view()))
    }
}
