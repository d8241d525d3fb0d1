//! In-process server for tests
//!
//! [`TestServer`] serves a router on an ephemeral local port, backed by a
//! [`LocalImageStore`] in a throwaway directory, and hands out a
//! [`FlowClient`] pointed at it.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use flow_core::LocalImageStore;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::{FlowClient, Result};

/// Request and connect timeout for the client a [`TestServer`] hands out
const TEST_CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// A server with its own upload directory, stopped when dropped
pub struct TestServer {
    addr: SocketAddr,
    client: FlowClient,
    upload_dir: PathBuf,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    // Removed from disk when the server goes away
    _tmp: TempDir,
}

impl TestServer {
    /// Build a router around a fresh image store and serve it
    ///
    /// ```ignore
    /// use flow_api::{create_router, AppState};
    /// use flow_client::testing::TestServer;
    ///
    /// let server = TestServer::start(|store| create_router(AppState::new(Arc::new(store)))).await?;
    /// server.client().upload_image("photo.png", png).await?;
    /// assert_eq!(server.stored_files().await?, ["photo.png"]);
    /// ```
    pub async fn start<F>(build_router: F) -> Result<Self>
    where
        F: FnOnce(LocalImageStore) -> axum::Router,
    {
        Self::start_with_timeout(build_router, TEST_CLIENT_TIMEOUT).await
    }

    /// Like [`TestServer::start`], with a custom client timeout
    pub async fn start_with_timeout<F>(build_router: F, timeout: Duration) -> Result<Self>
    where
        F: FnOnce(LocalImageStore) -> axum::Router,
    {
        let tmp = tempfile::tempdir()?;
        let upload_dir = tmp.path().join("uploads");
        let store = LocalImageStore::open(&upload_dir)
            .await
            .map_err(std::io::Error::other)?;
        let router = build_router(store);

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let stopped = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(stopped)
                .await
            {
                tracing::warn!(error = %e, "Test server exited with error");
            }
        });

        let client = FlowClient::with_config(&format!("http://{}", addr), timeout, timeout)?;
        tracing::debug!(%addr, upload_dir = %upload_dir.display(), "Test server listening");

        Ok(Self {
            addr,
            client,
            upload_dir,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
            _tmp: tmp,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://127.0.0.1:<port>`, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for a request path such as `/api/upload`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub fn client(&self) -> &FlowClient {
        &self.client
    }

    /// Directory the server writes accepted images to
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Names of the files currently in the upload directory, sorted
    pub async fn stored_files(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.upload_dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Stop accepting requests and wait for in-flight ones to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
