//! figma-flow client library
//!
//! Provides a typed HTTP client for the figma-flow backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use flow_client::FlowClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = FlowClient::new("http://127.0.0.1:5000")?;
//!
//!     // Echo a message
//!     let echoed = client.process(Some("print(1)"), Some("explain")).await?;
//!
//!     // Upload an image from disk
//!     let uploaded = client.upload_image_file("qr-code.png").await?;
//!     println!("stored as {}", uploaded.filename);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module runs a router on an ephemeral port, backed by a
//! temporary upload directory:
//!
//! ```rust,ignore
//! use flow_client::testing::TestServer;
//! use flow_api::{create_router, AppState};
//!
//! let server = TestServer::start(|store| create_router(AppState::new(Arc::new(store)))).await?;
//! let payload = server.client().test().await?;
//! ```

mod client;
mod error;
pub mod testing;

pub use client::FlowClient;
pub use error::{FlowClientError, Result};

// Re-export wire types for convenience
pub use flow_core::models::{
    ErrorResponse, ProcessRequest, ProcessResponse, Status, TestData, TestResponse,
    UploadResponse,
};
