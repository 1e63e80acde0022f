use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use taskpilot_api_types::{
    AutoApproveSettings, AutoApproveUpdate, CreateTaskRequest, LogEntry, McpDetails, McpSummary,
    Mode, Profile, RespondRequest, SendMessageRequest, SetEnabledRequest, SwitchModeRequest,
    SwitchProfileRequest, Task,
};

use crate::server::SharedState;

pub async fn get_instructions() -> impl IntoResponse {
    Json(json!({
        "service": "assistant-mock",
        "instructions": "External API test double. Drive it through /api/tasks, /api/messages, /api/modes, /api/profiles, /api/auto-approve and /api/mcps."
    }))
}

#[derive(Debug, Deserialize)]
pub struct ListTasksParams {
    pub limit: Option<usize>,
}

pub async fn list_tasks(
    State(state): State<SharedState>,
    Query(params): Query<ListTasksParams>,
) -> Json<Vec<Task>> {
    let state = state.lock().unwrap();
    Json(state.list_tasks(params.limit))
}

pub async fn create_task(
    State(state): State<SharedState>,
    Json(request): Json<CreateTaskRequest>,
) -> Json<Task> {
    let mut state = state.lock().unwrap();
    let task = state.create_task(&request);
    tracing::info!("created task {} ({:?})", task.id, task.status);
    Json(task)
}

fn check_status(state: &SharedState, task: Option<&str>) -> Result<Json<Task>, StatusCode> {
    let mut state = state.lock().unwrap();
    match state.resolve_task(task) {
        Some(record) => Ok(Json(record.check_status())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn current_task_status(
    State(state): State<SharedState>,
) -> Result<Json<Task>, StatusCode> {
    check_status(&state, None)
}

pub async fn task_status(
    Path(id): Path<String>,
    State(state): State<SharedState>,
) -> Result<Json<Task>, StatusCode> {
    check_status(&state, Some(&id))
}

fn read_logs(state: &SharedState, task: Option<&str>) -> Result<Json<Vec<LogEntry>>, StatusCode> {
    let mut state = state.lock().unwrap();
    match state.resolve_task(task) {
        Some(record) => Ok(Json(record.logs.clone())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn current_task_logs(
    State(state): State<SharedState>,
) -> Result<Json<Vec<LogEntry>>, StatusCode> {
    read_logs(&state, None)
}

pub async fn task_logs(
    Path(id): Path<String>,
    State(state): State<SharedState>,
) -> Result<Json<Vec<LogEntry>>, StatusCode> {
    read_logs(&state, Some(&id))
}

fn apply_response(
    state: &SharedState,
    task: Option<&str>,
    request: RespondRequest,
) -> Result<Json<Task>, StatusCode> {
    let mut state = state.lock().unwrap();
    match state.respond(task, request.response) {
        Some(Ok(task)) => Ok(Json(task)),
        // Task exists but is not waiting on the operator.
        Some(Err(())) => Err(StatusCode::CONFLICT),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn respond_current_task(
    State(state): State<SharedState>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<Task>, StatusCode> {
    apply_response(&state, None, request)
}

pub async fn respond_task(
    Path(id): Path<String>,
    State(state): State<SharedState>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<Task>, StatusCode> {
    apply_response(&state, Some(&id), request)
}

fn append_message(
    state: &SharedState,
    task: Option<&str>,
    request: SendMessageRequest,
) -> Result<Json<Task>, StatusCode> {
    let mut state = state.lock().unwrap();
    match state.send_message(task, request.message) {
        Some(task) => Ok(Json(task)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn send_message_current_task(
    State(state): State<SharedState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Task>, StatusCode> {
    append_message(&state, None, request)
}

pub async fn send_message_task(
    Path(id): Path<String>,
    State(state): State<SharedState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Task>, StatusCode> {
    append_message(&state, Some(&id), request)
}

pub async fn list_modes(State(state): State<SharedState>) -> Json<Vec<Mode>> {
    let state = state.lock().unwrap();
    Json(state.modes.clone())
}

pub async fn current_mode(State(state): State<SharedState>) -> Result<Json<Mode>, StatusCode> {
    let state = state.lock().unwrap();
    state
        .modes
        .iter()
        .find(|m| m.slug == state.current_mode)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub async fn switch_mode(
    State(state): State<SharedState>,
    Json(request): Json<SwitchModeRequest>,
) -> Result<Json<Mode>, StatusCode> {
    let mut state = state.lock().unwrap();
    match state.modes.iter().find(|m| m.slug == request.mode).cloned() {
        Some(mode) => {
            state.current_mode = mode.slug.clone();
            tracing::info!("switched mode to {}", mode.slug);
            Ok(Json(mode))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn list_profiles(State(state): State<SharedState>) -> Json<Vec<Profile>> {
    let state = state.lock().unwrap();
    Json(state.profiles.clone())
}

pub async fn current_profile(
    State(state): State<SharedState>,
) -> Result<Json<Profile>, StatusCode> {
    let state = state.lock().unwrap();
    state
        .profiles
        .iter()
        .find(|p| p.name == state.current_profile)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub async fn switch_profile(
    State(state): State<SharedState>,
    Json(request): Json<SwitchProfileRequest>,
) -> Result<Json<Profile>, StatusCode> {
    let mut state = state.lock().unwrap();
    match state
        .profiles
        .iter()
        .find(|p| p.name == request.name)
        .cloned()
    {
        Some(profile) => {
            state.current_profile = profile.name.clone();
            tracing::info!("switched profile to {}", profile.name);
            Ok(Json(profile))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn get_auto_approve(State(state): State<SharedState>) -> Json<AutoApproveSettings> {
    let state = state.lock().unwrap();
    Json(state.auto_approve)
}

pub async fn update_auto_approve(
    State(state): State<SharedState>,
    Json(update): Json<AutoApproveUpdate>,
) -> Json<AutoApproveSettings> {
    let mut state = state.lock().unwrap();
    let mut settings = state.auto_approve;
    update.apply_to(&mut settings);
    state.auto_approve = settings;
    Json(settings)
}

pub async fn set_auto_approve_enabled(
    State(state): State<SharedState>,
    Json(request): Json<SetEnabledRequest>,
) -> Json<AutoApproveSettings> {
    let mut state = state.lock().unwrap();
    state.auto_approve.auto_approval_enabled = request.enabled;
    Json(state.auto_approve)
}

pub async fn list_mcps(State(state): State<SharedState>) -> Json<Vec<McpSummary>> {
    let state = state.lock().unwrap();
    Json(
        state
            .mcps
            .iter()
            .map(|mcp| McpSummary {
                id: mcp.id.clone(),
                status: mcp.status,
            })
            .collect(),
    )
}

pub async fn mcp_details(
    Path(id): Path<String>,
    State(state): State<SharedState>,
) -> Result<Json<McpDetails>, StatusCode> {
    let state = state.lock().unwrap();
    state
        .mcps
        .iter()
        .find(|mcp| mcp.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn set_mcp_status(
    Path(id): Path<String>,
    State(state): State<SharedState>,
    Json(request): Json<SetEnabledRequest>,
) -> Result<Json<McpDetails>, StatusCode> {
    use taskpilot_api_types::McpStatus;

    let mut state = state.lock().unwrap();
    match state.mcps.iter_mut().find(|mcp| mcp.id == id) {
        Some(mcp) => {
            mcp.status = if request.enabled {
                McpStatus::Enabled
            } else {
                McpStatus::Disabled
            };
            tracing::info!("mcp {} is now {:?}", mcp.id, mcp.status);
            Ok(Json(mcp.clone()))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}
