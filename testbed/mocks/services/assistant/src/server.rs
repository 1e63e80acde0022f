use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    routing::{get, post},
    Router,
};
use taskpilot_api_types::TaskStatus;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::fixtures::{AssistantFixture, AssistantState};
use crate::handlers;

/// Shared mutable world state behind the routes.
pub type SharedState = Arc<Mutex<AssistantState>>;

pub struct MockAssistantServer {
    state: SharedState,
}

impl MockAssistantServer {
    pub fn new() -> Self {
        Self::with_fixture(AssistantFixture::create_test_fixture())
    }

    pub fn with_fixture(fixture: AssistantFixture) -> Self {
        Self {
            state: Arc::new(Mutex::new(AssistantState::from_fixture(fixture))),
        }
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/api/instructions", get(handlers::get_instructions))
            .route(
                "/api/tasks",
                get(handlers::list_tasks).post(handlers::create_task),
            )
            .route("/api/tasks/status", get(handlers::current_task_status))
            .route("/api/tasks/{id}/status", get(handlers::task_status))
            .route("/api/tasks/logs", get(handlers::current_task_logs))
            .route("/api/tasks/{id}/logs", get(handlers::task_logs))
            .route("/api/tasks/respond", post(handlers::respond_current_task))
            .route("/api/tasks/{id}/respond", post(handlers::respond_task))
            .route("/api/messages", post(handlers::send_message_current_task))
            .route("/api/messages/{id}", post(handlers::send_message_task))
            .route("/api/modes", get(handlers::list_modes))
            .route("/api/modes/current", get(handlers::current_mode))
            .route("/api/modes/switch", post(handlers::switch_mode))
            .route("/api/profiles", get(handlers::list_profiles))
            .route("/api/profiles/current", get(handlers::current_profile))
            .route("/api/profiles/switch", post(handlers::switch_profile))
            .route(
                "/api/auto-approve",
                get(handlers::get_auto_approve).post(handlers::update_auto_approve),
            )
            .route(
                "/api/auto-approve/enabled",
                post(handlers::set_auto_approve_enabled),
            )
            .route("/api/mcps", get(handlers::list_mcps))
            .route("/api/mcps/{id}", get(handlers::mcp_details))
            .route("/api/mcps/{id}/status", post(handlers::set_mcp_status))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind an ephemeral local port and serve in the background. The
    /// returned handle exposes the address, the shared state for scripting
    /// and assertions, and a graceful shutdown.
    pub async fn start(self) -> anyhow::Result<ServerHandle> {
        let app = self.router();
        let state = self.state;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tracing::info!("assistant mock listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                    tracing::info!("assistant mock shutting down gracefully");
                })
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("assistant mock server error: {}", e);
                });
        });

        Ok(ServerHandle {
            addr,
            shutdown_tx,
            state,
        })
    }

    /// Serve on a fixed address until the process ends (standalone binary).
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let app = self.router();
        let addr: SocketAddr = addr.parse()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("assistant mock listening on {}", addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("assistant mock server error: {}", e))
    }
}

impl Default for MockAssistantServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running background mock.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    state: SharedState,
}

impl ServerHandle {
    /// Server root; clients append the `/api` prefix themselves.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Direct access to the world state for test assertions.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Script the status sequence tasks created from now on walk through.
    pub fn script_next_tasks(
        &self,
        statuses: Vec<TaskStatus>,
        completion_message: Option<&str>,
    ) {
        self.state
            .lock()
            .unwrap()
            .script_next_tasks(statuses, completion_message.map(str::to_string));
    }

    /// How many status checks a task has received.
    pub fn status_checks(&self, task_id: &str) -> u32 {
        self.state
            .lock()
            .unwrap()
            .tasks
            .get(task_id)
            .map(|record| record.status_checks)
            .unwrap_or(0)
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            tracing::warn!("assistant mock shutdown signal already sent or receiver dropped");
        }
    }
}
