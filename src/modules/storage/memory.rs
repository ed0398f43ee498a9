use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::FileStorage;
use crate::core::error::AppError;

/// Uploaded object as seen by `MemoryStorage`
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

/// Records uploads in memory; can be switched to fail every upload
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<Vec<StoredObject>>,
    failing: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStorage for MemoryStorage {
    async fn upload(
        &self,
        filename: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Internal(format!(
                "Failed to upload file '{}': storage unavailable",
                filename
            )));
        }

        let key = format!("hazard-images/{}", filename);
        self.objects.lock().unwrap().push(StoredObject {
            key: key.clone(),
            size: data.len(),
            content_type: content_type.to_string(),
        });
        Ok(key)
    }
}
