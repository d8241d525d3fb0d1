//! Health and test commands

use anyhow::{Context, Result};
use flow_client::FlowClient;

use crate::output::OutputContext;

/// Check that the server is up
pub async fn health(client: &FlowClient, ctx: &OutputContext) -> Result<()> {
    let status = client.health().await.context("Health check failed")?;
    let greeting = client.greeting().await.context("Greeting failed")?;

    ctx.success(&format!("{} ({})", status, client.base_url()));
    ctx.info(&greeting);
    Ok(())
}

/// Fetch the static test payload
pub async fn test(client: &FlowClient, ctx: &OutputContext) -> Result<()> {
    let response = client.test().await?;

    let pairs = vec![
        ("Message", response.message.clone()),
        ("Sample", response.data.sample.clone()),
        ("Number", response.data.number.to_string()),
    ];

    ctx.print_kv(&pairs, &response);
    Ok(())
}
