//! flow-api - HTTP API layer for the figma-flow backend
//!
//! Routes requests to the greeting, test, echo and upload handlers. Image
//! persistence goes through the [`ImageStore`](flow_core::ImageStore) held in
//! [`AppState`], so the router itself is storage-agnostic.
//!
//! # Usage
//!
//! ```ignore
//! use flow_api::{create_router, AppState};
//! use flow_core::LocalImageStore;
//!
//! let store = LocalImageStore::open("uploads").await?;
//! let router = create_router(AppState::new(Arc::new(store)));
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::basic::hello))
        .route("/health", get(|| async { "OK" }))
        .route("/api/test", get(handlers::basic::test_endpoint))
        .route("/api/process", post(handlers::process::process_data))
        .route(
            "/api/upload",
            post(handlers::upload::upload_image)
                .layer(DefaultBodyLimit::max(state.max_upload_bytes())),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
