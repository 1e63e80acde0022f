//! Mock assistant API server for testing the external API client
//!
//! This crate provides a lightweight in-memory simulator of the assistant's
//! external HTTP API. The design philosophy emphasizes test isolation and
//! determinism: task status progressions are scripted per fixture, so the
//! client's polling, approval, and configuration flows can be exercised
//! without a live assistant. Tests run against an ephemeral local port;
//! a standalone binary serves the same routes on a fixed address for manual
//! runs of the examples and the CLI.

pub mod fixtures;
pub mod handlers;
pub mod server;

pub use fixtures::{AssistantFixture, AssistantState, TaskRecord};
pub use server::{MockAssistantServer, ServerHandle};

#[cfg(test)]
mod tests {
    use super::*;
    use taskpilot_api_types::{CreateTaskRequest, TaskStatus};

    #[test]
    fn test_fixture_catalogs() {
        let fixture = AssistantFixture::create_test_fixture();
        assert!(fixture.modes.iter().any(|m| m.slug == "architect"));
        assert!(fixture.profiles.iter().any(|p| p.name == "default"));
        assert_eq!(fixture.current_mode, "code");
        assert!(!fixture.auto_approve.auto_approval_enabled);
        assert!(fixture.mcps.iter().all(|m| m.status.is_enabled()));
    }

    #[test]
    fn test_scripted_status_sequence_is_consumed_per_check() {
        let mut state = AssistantState::from_fixture(AssistantFixture::create_test_fixture());
        state.script_next_tasks(
            vec![
                TaskStatus::InProgress,
                TaskStatus::InProgress,
                TaskStatus::Completed,
            ],
            Some("done".to_string()),
        );
        let created = state.create_task(&CreateTaskRequest::with_message("hi"));
        assert_eq!(created.status, TaskStatus::InProgress);

        let record = state.resolve_task(None).unwrap();
        assert_eq!(record.check_status().status, TaskStatus::InProgress);
        assert_eq!(record.check_status().status, TaskStatus::InProgress);
        let settled = record.check_status();
        assert_eq!(settled.status, TaskStatus::Completed);
        assert_eq!(settled.last_message.as_deref(), Some("done"));
        // Final entry is sticky.
        assert_eq!(record.check_status().status, TaskStatus::Completed);
        assert_eq!(record.status_checks, 4);
    }

    #[test]
    fn test_wait_for_completion_settles_immediately() {
        let mut state = AssistantState::from_fixture(AssistantFixture::create_test_fixture());
        let request = CreateTaskRequest::with_message("Hello!").wait_for_completion();
        let task = state.create_task(&request);
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.last_message.as_deref(), Some("All done."));
    }

    #[test]
    fn test_respond_requires_parked_task() {
        let mut state = AssistantState::from_fixture(AssistantFixture::create_test_fixture());
        state.script_next_tasks(
            vec![TaskStatus::NeedsApproval, TaskStatus::Completed],
            None,
        );
        let created = state.create_task(&CreateTaskRequest::with_message("deploy"));

        let approved = state
            .respond(Some(&created.id), "approve".to_string())
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, TaskStatus::Completed);

        // A second respond hits a task that is no longer waiting.
        assert!(state
            .respond(Some(&created.id), "approve".to_string())
            .unwrap()
            .is_err());
    }

    #[test]
    fn test_current_task_pointer_follows_creation() {
        let mut state = AssistantState::from_fixture(AssistantFixture::create_test_fixture());
        let first = state.create_task(&CreateTaskRequest::with_message("one"));
        let second = state.create_task(&CreateTaskRequest::with_message("two"));

        assert_eq!(state.current_task.as_deref(), Some(second.id.as_str()));
        // Listing is most recent first.
        let listed = state.list_tasks(Some(10));
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
        assert_eq!(state.list_tasks(Some(1)).len(), 1);
    }

    #[tokio::test]
    async fn test_http_connectivity() {
        let handle = MockAssistantServer::new().start().await.unwrap();

        let response = reqwest::get(format!("{}/api/instructions", handle.base_url()))
            .await
            .unwrap();
        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["service"], "assistant-mock");

        handle.shutdown().await;
    }
}
