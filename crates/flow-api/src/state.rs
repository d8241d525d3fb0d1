//! Application state for the API

use std::sync::Arc;

use flow_core::ImageStore;

/// Upload body limit used unless configured otherwise (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Where accepted images are written
    store: Arc<dyn ImageStore>,
    /// Largest accepted upload request body
    max_upload_bytes: usize,
}

impl AppState {
    /// Create a new AppState around an image store
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self {
            store,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Override the upload body limit
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Get the image store
    pub fn store(&self) -> &dyn ImageStore {
        self.store.as_ref()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
