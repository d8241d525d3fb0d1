//! Upload command - send image files to the server

use std::path::PathBuf;

use anyhow::{bail, Result};
use flow_client::FlowClient;

use crate::output::{OutputContext, UploadRow};

/// Upload each file in turn, reporting every result before failing
pub async fn upload(client: &FlowClient, files: &[PathBuf], ctx: &OutputContext) -> Result<()> {
    let mut rows = Vec::with_capacity(files.len());
    let mut failed = 0usize;

    for file in files {
        match client.upload_image_file(file).await {
            Ok(response) => rows.push(UploadRow {
                file: file.display().to_string(),
                stored_as: response.filename,
                result: response.message,
            }),
            Err(e) => {
                tracing::debug!(file = %file.display(), error = %e, "Upload failed");
                failed += 1;
                rows.push(UploadRow {
                    file: file.display().to_string(),
                    stored_as: "-".to_string(),
                    result: e.to_string(),
                });
            }
        }
    }

    ctx.print(&rows);

    if failed > 0 {
        ctx.error(&format!("{} of {} uploads failed", failed, files.len()));
        bail!("upload failed");
    }
    Ok(())
}
