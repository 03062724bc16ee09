use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::toy::Toy;
use tokio::fs;
use tracing::{debug, error};

use super::{StoreError, ToyStore};

/// JSON file holding the whole toy collection as a pretty-printed array.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Initialize the store from a path. Creates the file with an empty array if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        if fs::metadata(&file_path).await.is_err() {
            fs::write(&file_path, b"[]").await?;
        }

        Ok(Self { file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl ToyStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Toy>, StoreError> {
        let bytes = fs::read(&self.file_path).await?;
        let toys: Vec<Toy> = serde_json::from_slice(&bytes)?;
        debug!(path = %self.file_path.display(), count = toys.len(), "toys loaded");
        Ok(toys)
    }

    async fn save_all(&self, toys: &[Toy]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(toys)?;
        if let Err(e) = fs::write(&self.file_path, data).await {
            error!(path = %self.file_path.display(), error = %e, "cannot write to toys file");
            return Err(e.into());
        }
        Ok(())
    }
}
