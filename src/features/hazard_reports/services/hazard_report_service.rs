use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::hazard_reports::dtos::UploadedImage;
use crate::features::hazard_reports::models::{
    CreateHazardReport, HazardReport, UpdateHazardReport,
};
use crate::modules::storage::FileStorage;
use crate::modules::store::{HazardReportStore, UserStore};

/// Service for hazard report operations
pub struct HazardReportService {
    reports: Arc<dyn HazardReportStore>,
    users: Arc<dyn UserStore>,
    storage: Arc<dyn FileStorage>,
}

impl HazardReportService {
    pub fn new(
        reports: Arc<dyn HazardReportStore>,
        users: Arc<dyn UserStore>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            reports,
            users,
            storage,
        }
    }

    /// Create a report owned by `user_id`
    ///
    /// Images are uploaded only once the owner is known to exist; the report
    /// insert and the owner's `reports` append happen together in the store.
    pub async fn create(
        &self,
        user_id: Uuid,
        data: CreateHazardReport,
        images: Vec<UploadedImage>,
    ) -> Result<HazardReport> {
        self.users
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        for image in images {
            let key = self
                .storage
                .upload(&image.filename, image.data, &image.content_type)
                .await?;
            tracing::debug!(
                "Uploaded hazard image '{}' as '{}'",
                image.original_filename,
                key
            );
        }

        self.reports.create_for_user(user_id, &data).await
    }

    pub async fn list_all(&self) -> Result<Vec<HazardReport>> {
        self.reports.find_all().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<HazardReport> {
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Hazard Report not found".to_string()))
    }

    /// Update a report. Any caller may update any report.
    pub async fn update(&self, id: Uuid, data: &UpdateHazardReport) -> Result<HazardReport> {
        self.reports
            .find_by_id_and_update(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Hazard Report not found".to_string()))
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<HazardReport>> {
        let reports = self.reports.find_by_user(user_id).await?;
        tracing::debug!("Found {} hazard reports for user {}", reports.len(), user_id);
        Ok(reports)
    }

    /// Delete a report. The owner's `reports` list is left as is.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.reports
            .find_by_id_and_delete(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Hazard Report not found".to_string()))
    }
}
