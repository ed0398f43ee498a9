use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for hazard report
#[derive(Debug, Clone, FromRow)]
pub struct HazardReport {
    pub id: Uuid,
    pub report_type: String,
    pub description: String,
    pub status: String,
    /// Stored image filenames
    pub images: Vec<String>,
    /// Owning user, fixed at creation
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated data for creating a new hazard report
#[derive(Debug, Clone)]
pub struct CreateHazardReport {
    pub report_type: String,
    pub description: String,
    pub status: String,
    pub images: Vec<String>,
}

/// Validated data for updating a hazard report
///
/// `images: None` keeps the stored list.
#[derive(Debug, Clone)]
pub struct UpdateHazardReport {
    pub report_type: String,
    pub description: String,
    pub status: String,
    pub images: Option<Vec<String>>,
}
