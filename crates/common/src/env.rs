//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists; warn when the toys file is not there yet.
pub async fn ensure_env(data_dir: &str, toys_file: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    if tokio::fs::metadata(toys_file).await.is_err() {
        warn!(%toys_file, "toys file not found; starting with an empty catalog");
    } else {
        info!(%toys_file, "toys file found");
    }
    if let Some(parent) = Path::new(toys_file).parent() {
        if !parent.as_os_str().is_empty() && !parent.starts_with(data_dir) {
            warn!(%toys_file, %data_dir, "toys file lives outside the data directory");
        }
    }
    Ok(())
}
