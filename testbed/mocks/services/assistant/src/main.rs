use assistant_mock::MockAssistantServer;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let bind_addr =
        env::var("ASSISTANT_MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:3002".to_string());

    tracing::info!("starting assistant mock on {}", bind_addr);
    MockAssistantServer::new().serve(&bind_addr).await
}
