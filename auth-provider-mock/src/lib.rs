//! In-memory stand-in for the auth service
//!
//! Serves the same endpoints and envelopes as the real service from a
//! seeded in-memory directory. Used by integration tests and for local
//! development against `auth-provider`.

pub mod api;
pub mod config;
pub mod state;

pub use api::router;
pub use config::Config;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve `state` on an ephemeral localhost port.
///
/// Returns the bound address and the server task.
pub async fn spawn(state: Arc<AppState>) -> anyhow::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(state);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Mock auth server stopped");
        }
    });
    Ok((addr, handle))
}
