//! Integration tests for the figma-flow backend
//!
//! The tests in `tests/` drive the full stack over a real socket:
//! - HTTP API layer (`flow-api`)
//! - upload pipeline and local storage (`flow-core`)
//! - typed client (`flow-client`)
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p flow-tests
//! ```

use std::io::Cursor;
use std::sync::Arc;

use flow_api::{create_router, AppState};
use flow_client::testing::TestServer;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Start the production router with default limits
pub async fn start_server() -> TestServer {
    TestServer::start(|store| create_router(AppState::new(Arc::new(store))))
        .await
        .expect("Failed to start test server")
}

/// Encode a solid-colour test image
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3], format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format)
        .expect("Failed to encode test image");
    buf.into_inner()
}
