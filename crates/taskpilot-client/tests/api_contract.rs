//! Integration tests driving the client against the assistant mock over
//! real HTTP.

use std::time::Duration;

use assistant_mock::{MockAssistantServer, ServerHandle};
use taskpilot_api_types::{
    AutoApproveUpdate, CreateTaskRequest, SendMessageRequest, TaskStatus,
};
use taskpilot_client::{ApiError, AssistantClient, PollConfig};

async fn start_mock() -> (ServerHandle, AssistantClient) {
    let handle = MockAssistantServer::new()
        .start()
        .await
        .expect("mock failed to start");
    let client = AssistantClient::new(handle.base_url());
    (handle, client)
}

fn fast_poll(max_attempts: u32) -> PollConfig {
    PollConfig {
        interval: Duration::from_millis(10),
        max_attempts,
    }
}

#[tokio::test]
async fn create_task_returns_id_and_enum_status() {
    let (handle, client) = start_mock().await;

    let task = client
        .create_task(&CreateTaskRequest::with_message("Hello!").mode("architect"))
        .await
        .unwrap();

    assert!(!task.id.is_empty());
    assert!(matches!(
        task.status,
        TaskStatus::InProgress
            | TaskStatus::NeedsInput
            | TaskStatus::NeedsApproval
            | TaskStatus::Completed
            | TaskStatus::Error
    ));

    handle.shutdown().await;
}

#[tokio::test]
async fn wait_for_completion_yields_settled_record_and_idempotent_read() {
    let (handle, client) = start_mock().await;
    handle.script_next_tasks(
        vec![TaskStatus::InProgress, TaskStatus::Completed],
        Some("Hi!"),
    );

    let task = client
        .create_task(&CreateTaskRequest::with_message("Hello!").wait_for_completion())
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.last_message.as_deref(), Some("Hi!"));

    // A subsequent by-id status read returns the same record unchanged.
    let reread = client.task_status(Some(&task.id)).await.unwrap();
    assert_eq!(reread, task);

    handle.shutdown().await;
}

#[tokio::test]
async fn polling_settles_after_exactly_n_plus_one_checks() {
    let (handle, client) = start_mock().await;
    handle.script_next_tasks(
        vec![
            TaskStatus::InProgress,
            TaskStatus::InProgress,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ],
        Some("finished"),
    );

    let created = client
        .create_task(&CreateTaskRequest::with_message("work"))
        .await
        .unwrap();
    assert_eq!(created.status, TaskStatus::InProgress);

    let settled = client
        .wait_for_attention(Some(&created.id), &fast_poll(120))
        .await
        .unwrap();
    assert_eq!(settled.status, TaskStatus::Completed);

    // Three in_progress answers then one completed: exactly 4 checks.
    assert_eq!(handle.status_checks(&created.id), 4);

    handle.shutdown().await;
}

#[tokio::test]
async fn polling_stops_on_attention_states() {
    let (handle, client) = start_mock().await;
    handle.script_next_tasks(
        vec![
            TaskStatus::InProgress,
            TaskStatus::NeedsApproval,
            TaskStatus::Completed,
        ],
        None,
    );

    let created = client
        .create_task(&CreateTaskRequest::with_message("deploy"))
        .await
        .unwrap();

    let parked = client
        .wait_for_attention(Some(&created.id), &fast_poll(120))
        .await
        .unwrap();
    assert_eq!(parked.status, TaskStatus::NeedsApproval);

    handle.shutdown().await;
}

#[tokio::test]
async fn poll_timeout_reports_attempts_and_does_not_retry() {
    let (handle, client) = start_mock().await;
    handle.script_next_tasks(vec![TaskStatus::InProgress], None);

    let created = client
        .create_task(&CreateTaskRequest::with_message("forever"))
        .await
        .unwrap();

    let err = client
        .wait_for_attention(Some(&created.id), &fast_poll(5))
        .await
        .unwrap_err();
    match err {
        ApiError::PollTimeout {
            attempts,
            last_status,
        } => {
            assert_eq!(attempts, 5);
            assert_eq!(last_status, TaskStatus::InProgress);
        }
        other => panic!("expected PollTimeout, got {other:?}"),
    }
    // The budget is exact: no extra check happened after exhaustion.
    assert_eq!(handle.status_checks(&created.id), 5);

    handle.shutdown().await;
}

#[tokio::test]
async fn approval_flow_by_id_and_via_current_task() {
    let (handle, client) = start_mock().await;
    handle.script_next_tasks(
        vec![TaskStatus::NeedsApproval, TaskStatus::Completed],
        Some("shipped"),
    );

    // Addressed by id.
    let first = client
        .create_task(&CreateTaskRequest::with_message("run it").mode("architect"))
        .await
        .unwrap();
    let parked = client
        .wait_for_attention(Some(&first.id), &fast_poll(10))
        .await
        .unwrap();
    assert_eq!(parked.status, TaskStatus::NeedsApproval);

    let approved = client.approve(Some(&first.id)).await.unwrap();
    assert_eq!(approved.status, TaskStatus::Completed);

    // Addressed implicitly as the current task.
    let second = client
        .create_task(&CreateTaskRequest::with_message("run it again"))
        .await
        .unwrap();
    let parked = client.wait_for_attention(None, &fast_poll(10)).await.unwrap();
    assert_eq!(parked.id, second.id);
    assert_eq!(parked.status, TaskStatus::NeedsApproval);

    let approved = client.approve(None).await.unwrap();
    assert_eq!(approved.status, TaskStatus::Completed);

    handle.shutdown().await;
}

#[tokio::test]
async fn messages_and_logs_accumulate_in_order() {
    let (handle, client) = start_mock().await;

    let task = client
        .create_task(&CreateTaskRequest::with_message("first"))
        .await
        .unwrap();
    client
        .send_message(None, &SendMessageRequest::new("second"))
        .await
        .unwrap();
    client
        .send_message(
            Some(&task.id),
            &SendMessageRequest::new("third")
                .images(vec!["data:image/png;base64,AAAA".to_string()]),
        )
        .await
        .unwrap();

    let logs = client.task_logs(Some(&task.id)).await.unwrap();
    let contents: Vec<&str> = logs.iter().map(|entry| entry.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
    assert!(logs.iter().all(|entry| entry.role == "user"));

    // Current-task logs are the same history.
    let current_logs = client.task_logs(None).await.unwrap();
    assert_eq!(current_logs.len(), 3);

    handle.shutdown().await;
}

#[tokio::test]
async fn list_tasks_is_most_recent_first_and_honors_limit() {
    let (handle, client) = start_mock().await;

    let mut ids = Vec::new();
    for text in ["one", "two", "three"] {
        let task = client
            .create_task(&CreateTaskRequest::with_message(text))
            .await
            .unwrap();
        ids.push(task.id);
    }

    let listed = client.list_tasks(Some(2)).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, ids[2]);
    assert_eq!(listed[1].id, ids[1]);

    let all = client.list_tasks(None).await.unwrap();
    assert_eq!(all.len(), 3);

    handle.shutdown().await;
}

#[tokio::test]
async fn unknown_task_id_surfaces_not_found() {
    let (handle, client) = start_mock().await;

    let err = client.task_status(Some("no-such-task")).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));

    handle.shutdown().await;
}

#[tokio::test]
async fn mode_switching_confirms_and_rejects_unknown_slugs() {
    let (handle, client) = start_mock().await;

    let modes = client.list_modes().await.unwrap();
    assert!(modes.iter().any(|m| m.slug == "architect"));
    assert_eq!(client.current_mode().await.unwrap().slug, "code");

    let switched = client.switch_mode("architect").await.unwrap();
    assert_eq!(switched.slug, "architect");
    assert_eq!(client.current_mode().await.unwrap().slug, "architect");

    // An absent slug is a server-side error, surfaced not swallowed.
    let err = client.switch_mode("no-such-mode").await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    // And the current mode is untouched by the failed switch.
    assert_eq!(client.current_mode().await.unwrap().slug, "architect");

    handle.shutdown().await;
}

#[tokio::test]
async fn profile_switching_confirms_and_rejects_unknown_names() {
    let (handle, client) = start_mock().await;

    let profiles = client.list_profiles().await.unwrap();
    assert!(profiles.len() > 1);
    assert_eq!(client.current_profile().await.unwrap().name, "default");

    let other = profiles
        .iter()
        .find(|p| p.name != "default")
        .expect("fixture has a second profile");
    let switched = client.switch_profile(&other.name).await.unwrap();
    assert_eq!(switched.name, other.name);
    assert_eq!(client.current_profile().await.unwrap().name, other.name);

    let err = client.switch_profile("no-such-profile").await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));

    handle.shutdown().await;
}

#[tokio::test]
async fn partial_auto_approve_update_merges_and_echoes() {
    let (handle, client) = start_mock().await;

    let initial = client.auto_approve_settings().await.unwrap();
    assert!(!initial.auto_approval_enabled);

    let first = AutoApproveUpdate {
        auto_approval_enabled: Some(true),
        always_allow_read_only: Some(true),
        ..AutoApproveUpdate::default()
    };
    let after_first = client.update_auto_approve(&first).await.unwrap();
    assert!(after_first.auto_approval_enabled);
    assert!(after_first.always_allow_read_only);
    assert!(!after_first.always_allow_write);

    // A second partial update leaves earlier flags in place.
    let second = AutoApproveUpdate {
        always_allow_write: Some(true),
        ..AutoApproveUpdate::default()
    };
    let after_second = client.update_auto_approve(&second).await.unwrap();
    assert!(after_second.always_allow_read_only);
    assert!(after_second.always_allow_write);

    // The client echoes exactly what the server now holds.
    let fetched = client.auto_approve_settings().await.unwrap();
    assert_eq!(fetched, after_second);

    handle.shutdown().await;
}

#[tokio::test]
async fn master_switch_toggles_independently_of_category_flags() {
    let (handle, client) = start_mock().await;

    let update = AutoApproveUpdate {
        auto_approval_enabled: Some(true),
        always_allow_browser: Some(true),
        ..AutoApproveUpdate::default()
    };
    client.update_auto_approve(&update).await.unwrap();

    let disabled = client.set_auto_approve_enabled(false).await.unwrap();
    assert!(!disabled.auto_approval_enabled);
    // Per-category flags keep their values.
    assert!(disabled.always_allow_browser);

    handle.shutdown().await;
}

#[tokio::test]
async fn mcp_disable_then_reenable_round_trips() {
    let (handle, client) = start_mock().await;

    let mcps = client.list_mcps().await.unwrap();
    assert!(!mcps.is_empty());
    let id = &mcps[0].id;

    let before = client.mcp_details(id).await.unwrap();
    assert!(before.status.is_enabled());

    let disabled = client.set_mcp_status(id, false).await.unwrap();
    assert!(!disabled.status.is_enabled());

    let reenabled = client.set_mcp_status(id, true).await.unwrap();
    assert!(reenabled.status.is_enabled());

    let after = client.mcp_details(id).await.unwrap();
    assert_eq!(after.status, before.status);

    let err = client.mcp_details("no-such-mcp").await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));

    handle.shutdown().await;
}

#[tokio::test]
async fn connection_failure_carries_configuration_hints() {
    // Bind then drop a listener so the port is known to be closed.
    let closed_addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let client = AssistantClient::new(format!("http://{}", closed_addr))
        .with_timeout(Duration::from_secs(2));
    let err = client.check_connection().await.unwrap_err();

    match &err {
        ApiError::Connection { .. } => {}
        other => panic!("expected Connection, got {other:?}"),
    }
    let rendered = err.to_string();
    assert!(rendered.contains("external API is enabled"));
    assert!(rendered.contains("port matches"));
}

#[tokio::test]
async fn connectivity_probe_succeeds_against_running_mock() {
    let (handle, client) = start_mock().await;
    client.check_connection().await.unwrap();
    handle.shutdown().await;
}
