//! Core types for the assistant external API contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Execution state of a task as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The task is actively being worked on.
    InProgress,
    /// The task is parked, waiting for a free-text reply from the operator.
    NeedsInput,
    /// The task is parked, waiting for an approval decision.
    NeedsApproval,
    /// The task finished successfully.
    Completed,
    /// The task finished with an error.
    Error,
}

impl TaskStatus {
    /// Whether the task has finished and will not change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Error)
    }

    /// Whether the task is parked on the operator (input or approval).
    pub fn needs_attention(&self) -> bool {
        matches!(self, TaskStatus::NeedsInput | TaskStatus::NeedsApproval)
    }

    /// Whether polling should stop: the task is terminal or parked on the
    /// operator. Only `in_progress` keeps a poll loop going.
    pub fn is_settled(&self) -> bool {
        self.is_terminal() || self.needs_attention()
    }
}

/// A unit of assistant work tracked by id and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier assigned by the server.
    pub id: String,
    /// Current execution state.
    pub status: TaskStatus,
    /// The most recent message produced by the task, when available.
    #[serde(rename = "lastMessage", skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
}

/// One record of a task's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Who produced the entry ("user", "assistant", ...).
    pub role: String,
    /// The text of the entry.
    pub content: String,
    /// When the entry was recorded, if the server tracks it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A named operating profile governing how tasks are processed.
/// Exactly one mode is current at a time; switching addresses it by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    /// Stable identifier used when switching.
    pub slug: String,
    /// Human-readable name.
    pub name: String,
}

/// A named configuration bundle, distinct from a mode.
/// Exactly one profile is current at a time; switching addresses it by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// The profile's name, also its identifier when switching.
    pub name: String,
}

/// The full auto-approve flag record held as server-side state.
///
/// A settings read or update response always carries every flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoApproveSettings {
    /// Master switch; per-category flags have no effect while this is off.
    pub auto_approval_enabled: bool,
    /// Approve read-only actions without asking.
    pub always_allow_read_only: bool,
    /// Approve write actions without asking.
    pub always_allow_write: bool,
    /// Approve command execution without asking.
    pub always_allow_execute: bool,
    /// Approve browser actions without asking.
    pub always_allow_browser: bool,
    /// Approve MCP tool invocations without asking.
    pub always_allow_mcp: bool,
    /// Approve request resubmission without asking.
    pub always_approve_resubmit: bool,
}

/// Partial form of [`AutoApproveSettings`] for updates.
///
/// Omitted flags are left unchanged by the server (merge semantics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoApproveUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_approval_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_allow_read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_allow_write: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_allow_execute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_allow_browser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_allow_mcp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_approve_resubmit: Option<bool>,
}

impl AutoApproveUpdate {
    /// Merge this partial update into an existing settings record, leaving
    /// omitted flags untouched.
    pub fn apply_to(&self, settings: &mut AutoApproveSettings) {
        if let Some(v) = self.auto_approval_enabled {
            settings.auto_approval_enabled = v;
        }
        if let Some(v) = self.always_allow_read_only {
            settings.always_allow_read_only = v;
        }
        if let Some(v) = self.always_allow_write {
            settings.always_allow_write = v;
        }
        if let Some(v) = self.always_allow_execute {
            settings.always_allow_execute = v;
        }
        if let Some(v) = self.always_allow_browser {
            settings.always_allow_browser = v;
        }
        if let Some(v) = self.always_allow_mcp {
            settings.always_allow_mcp = v;
        }
        if let Some(v) = self.always_approve_resubmit {
            settings.always_approve_resubmit = v;
        }
    }
}

/// Availability of an MCP integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpStatus {
    /// The integration is available to tasks.
    Enabled,
    /// The integration is switched off.
    Disabled,
}

impl McpStatus {
    pub fn is_enabled(&self) -> bool {
        matches!(self, McpStatus::Enabled)
    }
}

/// Listing entry for an MCP integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpSummary {
    /// Identifier used for detail fetches and status toggling.
    pub id: String,
    /// Whether the integration is currently available.
    pub status: McpStatus,
}

/// Full metadata for an MCP integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpDetails {
    pub id: String,
    pub status: McpStatus,
    /// Human-readable name, when the server knows one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Names of the tools the integration exposes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
}

/// Payload for `POST /api/tasks`.
///
/// All fields are optional; an empty payload creates a blank task. When
/// `wait_for_completion` is set the server blocks until the task first
/// reaches a terminal-or-attention status before responding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Mode slug to run the task under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Profile name to run the task under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_completion: Option<bool>,
}

impl CreateTaskRequest {
    /// Start from an initial message, the common case.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn mode(mut self, slug: impl Into<String>) -> Self {
        self.mode = Some(slug.into());
        self
    }

    pub fn profile(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(name.into());
        self
    }

    pub fn wait_for_completion(mut self) -> Self {
        self.wait_for_completion = Some(true);
        self
    }
}

/// Payload for `POST /api/messages` and `POST /api/messages/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// The message text.
    pub message: String,
    /// Optional image attachments as data-URI or base64 strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl SendMessageRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            images: None,
        }
    }

    pub fn images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }
}

/// Payload for `POST /api/tasks/respond` and `POST /api/tasks/{id}/respond`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondRequest {
    /// The decision or reply text. `"approve"` accepts a pending approval.
    pub response: String,
}

impl RespondRequest {
    /// The approval decision exercised by a task in `needs_approval`.
    pub fn approve() -> Self {
        Self {
            response: "approve".to_string(),
        }
    }

    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Payload for `POST /api/modes/switch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchModeRequest {
    /// Slug of the mode to make current.
    pub mode: String,
}

/// Payload for `POST /api/profiles/switch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchProfileRequest {
    /// Name of the profile to make current.
    pub name: String,
}

/// Boolean toggle payload, used by `POST /api/auto-approve/enabled` and
/// `POST /api/mcps/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEnabledRequest {
    pub enabled: bool,
}
