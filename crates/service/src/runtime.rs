//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Ensure the data directory exists before the store opens the toys file.
pub async fn ensure_env(data_dir: &str, toys_file: &str) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir, toys_file).await
}
