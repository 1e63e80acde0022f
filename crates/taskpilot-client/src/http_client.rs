use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use taskpilot_api_types::{
    AutoApproveSettings, AutoApproveUpdate, CreateTaskRequest, LogEntry, McpDetails, McpSummary,
    Mode, Profile, RespondRequest, SendMessageRequest, SetEnabledRequest, SwitchModeRequest,
    SwitchProfileRequest, Task, TaskStatus,
};

use crate::error::{ApiError, Result};

/// Default server address when no configuration is supplied.
///
/// Deployments differ on the port (3000 and 3002 are both in the wild), so
/// every constructor treats the address as a parameter; this is only the
/// fallback.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3002";

/// Client-side status-polling convention: check at a fixed interval up to a
/// bounded number of attempts. Nothing else in the client retries.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Pause between consecutive status checks.
    pub interval: Duration,
    /// Maximum number of status checks before giving up.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 120,
        }
    }
}

/// HTTP client for driving an assistant server through its external API.
///
/// Holds the server root (e.g. `http://localhost:3002`); the fixed `/api`
/// prefix is appended per request. The implicit "current task" selection
/// lives server-side: operations that accept `Option<&str>` address a task
/// by id when given `Some`, and the server's active selection when given
/// `None`.
#[derive(Clone)]
pub struct AssistantClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl AssistantClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe reachability via `GET /api/instructions`.
    ///
    /// A transport-level failure maps to [`ApiError::Connection`], whose
    /// message carries the server-configuration checklist.
    pub async fn check_connection(&self) -> Result<()> {
        let endpoint = self.endpoint("/instructions");
        let response = self
            .client
            .get(&endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(&endpoint, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http(status, endpoint, body));
        }
        log::debug!("assistant API reachable at {}", self.base_url);
        Ok(())
    }

    /// Create a task. With `wait_for_completion` set, the server blocks
    /// until the task first reaches a terminal-or-attention status, so the
    /// returned record already reflects it.
    pub async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task> {
        let task: Task = self.post_json("/tasks", request).await?;
        log::debug!("created task {} ({:?})", task.id, task.status);
        Ok(task)
    }

    /// List recent tasks, most recent first.
    pub async fn list_tasks(&self, limit: Option<usize>) -> Result<Vec<Task>> {
        let endpoint = self.endpoint("/tasks");
        let mut request = self.client.get(&endpoint).timeout(self.timeout);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(&endpoint, e))?;
        Self::decode(response, &endpoint).await
    }

    /// Fetch the status of a task, or of the current task when `task` is
    /// `None`.
    pub async fn task_status(&self, task: Option<&str>) -> Result<Task> {
        self.get_json(&Self::task_path(task, "status")).await
    }

    /// Fetch the full ordered conversation history of a task, or of the
    /// current task when `task` is `None`.
    pub async fn task_logs(&self, task: Option<&str>) -> Result<Vec<LogEntry>> {
        self.get_json(&Self::task_path(task, "logs")).await
    }

    /// Append a message (text plus optional images) to a task's
    /// conversation, or to the current task when `task` is `None`.
    pub async fn send_message(
        &self,
        task: Option<&str>,
        request: &SendMessageRequest,
    ) -> Result<Task> {
        let path = match task {
            Some(id) => format!("/messages/{}", id),
            None => "/messages".to_string(),
        };
        self.post_json(&path, request).await
    }

    /// Submit a decision or reply to a task that is parked on the operator.
    pub async fn respond(&self, task: Option<&str>, response: impl Into<String>) -> Result<Task> {
        self.post_json(
            &Self::task_path(task, "respond"),
            &RespondRequest::new(response),
        )
        .await
    }

    /// Submit the `"approve"` decision to a task awaiting approval.
    pub async fn approve(&self, task: Option<&str>) -> Result<Task> {
        self.post_json(&Self::task_path(task, "respond"), &RespondRequest::approve())
            .await
    }

    /// Poll a task's status until it settles (terminal or parked on the
    /// operator), sleeping `config.interval` between checks.
    ///
    /// Fails with [`ApiError::PollTimeout`] once `config.max_attempts`
    /// checks have all come back `in_progress`; no further retry happens.
    pub async fn wait_for_attention(
        &self,
        task: Option<&str>,
        config: &PollConfig,
    ) -> Result<Task> {
        let mut last_status = TaskStatus::InProgress;
        for attempt in 1..=config.max_attempts {
            let record = self.task_status(task).await?;
            if record.status.is_settled() {
                log::debug!(
                    "task {} settled as {:?} after {} status checks",
                    record.id,
                    record.status,
                    attempt
                );
                return Ok(record);
            }
            last_status = record.status;
            if attempt < config.max_attempts {
                tokio::time::sleep(config.interval).await;
            }
        }
        Err(ApiError::poll_timeout(config.max_attempts, last_status))
    }

    pub async fn list_modes(&self) -> Result<Vec<Mode>> {
        self.get_json("/modes").await
    }

    pub async fn current_mode(&self) -> Result<Mode> {
        self.get_json("/modes/current").await
    }

    /// Make the mode with the given slug current. Unknown slugs surface as
    /// an [`ApiError::Http`] from the server.
    pub async fn switch_mode(&self, slug: impl Into<String>) -> Result<Mode> {
        self.post_json("/modes/switch", &SwitchModeRequest { mode: slug.into() })
            .await
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.get_json("/profiles").await
    }

    pub async fn current_profile(&self) -> Result<Profile> {
        self.get_json("/profiles/current").await
    }

    pub async fn switch_profile(&self, name: impl Into<String>) -> Result<Profile> {
        self.post_json("/profiles/switch", &SwitchProfileRequest { name: name.into() })
            .await
    }

    pub async fn auto_approve_settings(&self) -> Result<AutoApproveSettings> {
        self.get_json("/auto-approve").await
    }

    /// Apply a partial update; the server merges it and returns the full
    /// resulting record, which is echoed back unchanged.
    pub async fn update_auto_approve(
        &self,
        update: &AutoApproveUpdate,
    ) -> Result<AutoApproveSettings> {
        self.post_json("/auto-approve", update).await
    }

    /// Toggle the master switch independent of the per-category flags.
    pub async fn set_auto_approve_enabled(&self, enabled: bool) -> Result<AutoApproveSettings> {
        self.post_json("/auto-approve/enabled", &SetEnabledRequest { enabled })
            .await
    }

    pub async fn list_mcps(&self) -> Result<Vec<McpSummary>> {
        self.get_json("/mcps").await
    }

    pub async fn mcp_details(&self, id: &str) -> Result<McpDetails> {
        self.get_json(&format!("/mcps/{}", id)).await
    }

    pub async fn set_mcp_status(&self, id: &str, enabled: bool) -> Result<McpDetails> {
        self.post_json(&format!("/mcps/{}/status", id), &SetEnabledRequest { enabled })
            .await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn task_path(task: Option<&str>, suffix: &str) -> String {
        match task {
            Some(id) => format!("/tasks/{}/{}", id, suffix),
            None => format!("/tasks/{}", suffix),
        }
    }

    fn transport_error(&self, endpoint: &str, err: reqwest::Error) -> ApiError {
        if err.is_connect() {
            ApiError::connection(self.base_url.clone(), err)
        } else {
            ApiError::request(endpoint, err)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let endpoint = self.endpoint(path);
        let response = self
            .client
            .get(&endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(&endpoint, e))?;
        Self::decode(response, &endpoint).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let endpoint = self.endpoint(path);
        let response = self
            .client
            .post(&endpoint)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&endpoint, e))?;
        Self::decode(response, &endpoint).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, endpoint: &str) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("{} returned {}: {}", endpoint, status, body);
            return Err(ApiError::http(status, endpoint, body));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::payload(endpoint, e.to_string()))
    }
}
