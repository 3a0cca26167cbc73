//! HTTP server setup.
//!
//! Binds a TCP listener and serves the router from `api`, optionally with
//! graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use strings_storage::RecordStore;

use crate::api::router;
use crate::service::StringService;

/// Run the HTTP server until the process exits.
pub async fn run_server(
    addr: SocketAddr,
    store: Arc<dyn RecordStore>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    run_server_with_shutdown(addr, store, std::future::pending()).await
}

/// Run the HTTP server with graceful shutdown support.
///
/// Accepts a shutdown signal future that, when resolved, stops accepting
/// connections and lets in-flight requests finish.
pub async fn run_server_with_shutdown<F>(
    addr: SocketAddr,
    store: Arc<dyn RecordStore>,
    shutdown_signal: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    serve(listener, store, shutdown_signal).await
}

/// Serve on an already bound listener.
///
/// Lets callers bind port 0 and read the chosen address before serving.
pub async fn serve<F>(
    listener: TcpListener,
    store: Arc<dyn RecordStore>,
    shutdown_signal: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(Arc::new(StringService::new(store)));

    info!("HTTP server ready on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use strings_storage::Storage;
    use tempfile::TempDir;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_server_starts_and_shuts_down() {
        let temp_dir = TempDir::new().unwrap();
        let storage: Arc<dyn RecordStore> = Arc::new(Storage::open(temp_dir.path()).unwrap());

        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server_handle = tokio::spawn(async move {
            run_server_with_shutdown(addr, storage, async {
                rx.await.ok();
            })
            .await
        });

        // Give server time to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        tx.send(()).ok();

        let result = timeout(Duration::from_secs(5), server_handle).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_serve_on_bound_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let store: Arc<dyn RecordStore> = Arc::new(strings_storage::MemoryStore::new());

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let server_handle = tokio::spawn(serve(listener, store, async {
            rx.await.ok();
        }));

        let stream = tokio::net::TcpStream::connect(addr).await;
        assert!(stream.is_ok());
        drop(stream);

        tx.send(()).ok();
        let result = timeout(Duration::from_secs(5), server_handle).await;
        assert!(result.is_ok());
    }
}
