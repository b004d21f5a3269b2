use auth_provider_mock::{AppState, Config, router};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_provider_mock=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    let state = Arc::new(AppState::seeded());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    info!(addr = %listener.local_addr()?, "Mock auth service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
