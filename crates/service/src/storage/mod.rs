//! Storage abstractions for service layer
//!
//! The catalog is read once at startup and written back whole after every
//! mutation, so a store only has to load and overwrite the full collection.

use async_trait::async_trait;
use models::toy::Toy;
use thiserror::Error;

pub mod json_file_store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Whole-collection persistence for toys.
#[async_trait]
pub trait ToyStore: Send + Sync {
    async fn load_all(&self) -> Result<Vec<Toy>, StoreError>;
    async fn save_all(&self, toys: &[Toy]) -> Result<(), StoreError>;
}
