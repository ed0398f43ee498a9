//! Storage module for hazard images
//!
//! `FileStorage` is the seam the hazard report service uploads through;
//! `MinIOClient` is the MinIO/S3-compatible implementation.

mod minio_client;

#[cfg(test)]
mod memory;

use async_trait::async_trait;

use crate::core::error::AppError;

pub use minio_client::MinIOClient;

#[cfg(test)]
pub use memory::MemoryStorage;

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `data` under `filename` and return the object key
    async fn upload(
        &self,
        filename: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError>;
}
