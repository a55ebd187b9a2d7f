//! One-shot outbound send

use crate::server::{load_config, open_store};
use anyhow::{Context, Result};
use std::sync::Arc;
use wabridge_core::OutboundRelay;

/// Send `content` to `to` and print the stored record as JSON
pub async fn run(to: &str, content: &str) -> Result<()> {
    let config = load_config()?;
    let relay_config = config.relay_config();
    relay_config
        .validate_outbound()
        .context("Invalid outbound configuration")?;

    let store = open_store(&config).await?;
    let relay = OutboundRelay::from_config(&relay_config, Arc::new(store))
        .context("Failed to create outbound relay")?;

    let record = relay.send(to, content).await.context("Send failed")?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
