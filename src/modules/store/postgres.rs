use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{HazardReportStore, UserStore};
use crate::core::error::{AppError, Result};
use crate::features::hazard_reports::models::{
    CreateHazardReport, HazardReport, UpdateHazardReport,
};
use crate::features::users::models::User;

/// PostgreSQL-backed store for hazard reports and users
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HazardReportStore for PgStore {
    async fn create_for_user(
        &self,
        user_id: Uuid,
        data: &CreateHazardReport,
    ) -> Result<HazardReport> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin hazard report transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let report = sqlx::query_as::<_, HazardReport>(
            r#"
            INSERT INTO hazard_reports (report_type, description, status, images, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, report_type, description, status, images, user_id, created_at, updated_at
            "#,
        )
        .bind(&data.report_type)
        .bind(&data.description)
        .bind(&data.status)
        .bind(&data.images)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert hazard report: {:?}", e);
            AppError::Database(e)
        })?;

        let linked = sqlx::query(
            r#"
            UPDATE users
            SET reports = array_append(reports, $1), updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(report.id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to link hazard report to user: {:?}", e);
            AppError::Database(e)
        })?;

        // Owner vanished between lookup and insert; dropping `tx` rolls back
        if linked.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit hazard report transaction: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Created hazard report: {} for user: {}", report.id, user_id);

        Ok(report)
    }

    async fn find_all(&self) -> Result<Vec<HazardReport>> {
        sqlx::query_as::<_, HazardReport>(
            r#"
            SELECT id, report_type, description, status, images, user_id, created_at, updated_at
            FROM hazard_reports
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list hazard reports: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HazardReport>> {
        sqlx::query_as::<_, HazardReport>(
            r#"
            SELECT id, report_type, description, status, images, user_id, created_at, updated_at
            FROM hazard_reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get hazard report by id: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id_and_update(
        &self,
        id: Uuid,
        data: &UpdateHazardReport,
    ) -> Result<Option<HazardReport>> {
        let report = sqlx::query_as::<_, HazardReport>(
            r#"
            UPDATE hazard_reports
            SET report_type = $2,
                description = $3,
                status = $4,
                images = COALESCE($5, images),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, report_type, description, status, images, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.report_type)
        .bind(&data.description)
        .bind(&data.status)
        .bind(&data.images)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update hazard report: {:?}", e);
            AppError::Database(e)
        })?;

        if let Some(ref r) = report {
            tracing::info!("Updated hazard report: {}", r.id);
        }

        Ok(report)
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<HazardReport>> {
        let report = sqlx::query_as::<_, HazardReport>(
            r#"
            DELETE FROM hazard_reports
            WHERE id = $1
            RETURNING id, report_type, description, status, images, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete hazard report: {:?}", e);
            AppError::Database(e)
        })?;

        if let Some(ref r) = report {
            tracing::info!("Deleted hazard report: {} (owner: {})", r.id, r.user_id);
        }

        Ok(report)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<HazardReport>> {
        sqlx::query_as::<_, HazardReport>(
            r#"
            SELECT id, report_type, description, status, images, user_id, created_at, updated_at
            FROM hazard_reports
            WHERE user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list hazard reports for user: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, user_name, email, role, reports, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user by id: {:?}", e);
            AppError::Database(e)
        })
    }
}
