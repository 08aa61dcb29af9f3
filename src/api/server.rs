//! HTTP server lifecycle.
//!
//! Binds a listener, mounts `api_router()`, and runs the serve loop in
//! a background task. The returned handle carries the bound address
//! and a shutdown channel; in-flight requests drain before the task
//! exits.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

/// Handle to a running API server.
pub struct ApiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ApiServer {
    /// The address the server is actually bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal the server to shut down gracefully. Safe to call more
    /// than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Wait for the serve loop to finish.
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

/// Start the API server on an already-bound listener.
pub fn start_server(listener: TcpListener, ctx: ApiContext) -> std::io::Result<ApiServer> {
    let addr = listener.local_addr()?;
    let app = api_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        tracing::info!(%addr, "API server listening");

        if let Err(err) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!(error = %err, "API server error");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn start_test_server() -> (ApiServer, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ApiContext::new(tmp.path().join("test.db"), tmp.path().join("uploads"));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        (start_server(listener, ctx).unwrap(), tmp)
    }

    #[tokio::test]
    async fn serves_health_over_tcp() {
        let (mut server, _tmp) = start_test_server().await;

        // HTTP/1.0 so the server closes the connection after responding
        let mut stream = tokio::net::TcpStream::connect(server.addr()).await.unwrap();
        stream
            .write_all(b"GET /api/health HTTP/1.0\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        let response = String::from_utf8_lossy(&response);

        let status_line = response.lines().next().unwrap_or_default();
        assert!(status_line.contains("200"), "got: {status_line}");
        assert!(response.contains("\"status\":\"ok\""));

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (mut server, _tmp) = start_test_server().await;

        server.shutdown();
        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn shutdown_releases_the_port() {
        let (mut server, _tmp) = start_test_server().await;
        let addr = server.addr();

        server.shutdown();
        server.wait().await;

        // the listener is gone, so the port can be bound again
        let rebound = TcpListener::bind(addr).await;
        assert!(rebound.is_ok());
    }
}
