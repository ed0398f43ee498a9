use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::error::{AppError, Result};
use crate::features::hazard_reports::models::{
    CreateHazardReport, HazardReport, UpdateHazardReport,
};

/// Allowed MIME types for hazard images
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum size of a single image in bytes (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of images attached to one report
pub const MAX_IMAGES: usize = 10;

/// Check if a MIME type is allowed for hazard images
pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// Get file extension from content type
pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Field order used to pick the reported message when several fields fail
const FIELD_ORDER: &[&str] = &["report_type", "description", "status", "images"];

/// Hazard report payload
///
/// Multipart text fields on create, JSON body on update. The same rules apply
/// to both; only the source of `images` differs (uploaded files on create,
/// the body on update).
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HazardReportPayload {
    #[validate(
        required(message = "\"reportType\" is required"),
        length(
            min = 1,
            max = 100,
            message = "\"reportType\" length must be between 1 and 100 characters"
        )
    )]
    #[schema(example = "spill")]
    pub report_type: Option<String>,

    #[validate(
        required(message = "\"description\" is required"),
        length(
            min = 1,
            max = 2000,
            message = "\"description\" length must be between 1 and 2000 characters"
        )
    )]
    #[schema(example = "oil on floor")]
    pub description: Option<String>,

    #[validate(
        required(message = "\"status\" is required"),
        length(
            min = 1,
            max = 50,
            message = "\"status\" length must be between 1 and 50 characters"
        )
    )]
    #[schema(example = "open")]
    pub status: Option<String>,

    #[validate(
        length(max = 10, message = "\"images\" must contain at most 10 items"),
        custom(function = "validate_image_names")
    )]
    pub images: Option<Vec<String>>,
}

fn validate_image_names(images: &[String]) -> std::result::Result<(), ValidationError> {
    let valid = images
        .iter()
        .all(|name| !name.trim().is_empty() && !name.contains(['/', '\\']));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("image_name")
            .with_message("\"images\" must only contain plain filenames".into()))
    }
}

/// First failing rule's message, in declaration order
fn first_error_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .filter_map(|errs| errs.first())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

impl HazardReportPayload {
    fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::Validation(first_error_message(&e)))
    }

    /// Validate for creation; `images` are the stored names of the uploaded files
    pub fn into_create(self, images: Vec<String>) -> Result<CreateHazardReport> {
        let payload = Self {
            images: Some(images),
            ..self
        };
        payload.check()?;

        Ok(CreateHazardReport {
            report_type: payload.report_type.unwrap_or_default(),
            description: payload.description.unwrap_or_default(),
            status: payload.status.unwrap_or_default(),
            images: payload.images.unwrap_or_default(),
        })
    }

    /// Validate for update; absent `images` leaves the stored list untouched
    pub fn into_update(self) -> Result<UpdateHazardReport> {
        self.check()?;

        Ok(UpdateHazardReport {
            report_type: self.report_type.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            images: self.images,
        })
    }
}

/// Create hazard report request for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct CreateHazardReportForm {
    #[schema(example = "spill")]
    pub report_type: String,
    #[schema(example = "oil on floor")]
    pub description: String,
    #[schema(example = "open")]
    pub status: String,
    /// Image files (jpeg, png, gif, webp), repeat the field for several images
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<Vec<u8>>,
}

/// Image read from a multipart upload, named for storage
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Generated stored filename (`<uuid-v7>.<ext>`)
    pub filename: String,
    pub original_filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedImage {
    pub fn new(original_filename: String, content_type: String, data: Vec<u8>) -> Result<Self> {
        if data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::BadRequest(format!(
                "Image '{}' too large. Maximum size is {} bytes ({} MB)",
                original_filename,
                MAX_IMAGE_SIZE,
                MAX_IMAGE_SIZE / 1024 / 1024
            )));
        }

        if !is_image_type_allowed(&content_type) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }
        let extension = get_extension_from_content_type(&content_type).unwrap_or("bin");

        Ok(Self {
            filename: format!("{}.{}", Uuid::now_v7(), extension),
            original_filename,
            content_type,
            data,
        })
    }
}

/// Response DTO for hazard report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HazardReportDto {
    pub id: Uuid,
    pub report_type: String,
    pub description: String,
    pub status: String,
    pub images: Vec<String>,
    /// Owning user id
    pub user: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HazardReport> for HazardReportDto {
    fn from(r: HazardReport) -> Self {
        Self {
            id: r.id,
            report_type: r.report_type,
            description: r.description,
            status: r.status,
            images: r.images,
            user: r.user_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// `{ message, hazardReport }` returned by create and update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HazardReportResponse {
    pub message: String,
    pub hazard_report: HazardReportDto,
}

/// `{ message, hazardreport }` returned by get-by-id
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HazardReportFoundResponse {
    pub message: String,
    pub hazardreport: HazardReportDto,
}

/// `{ message, hazardReports, count }` returned by the list endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HazardReportListResponse {
    pub message: String,
    pub hazard_reports: Vec<HazardReportDto>,
    pub count: usize,
}

impl HazardReportListResponse {
    pub fn new(message: impl Into<String>, reports: Vec<HazardReport>) -> Self {
        let hazard_reports: Vec<HazardReportDto> = reports.into_iter().map(|r| r.into()).collect();
        Self {
            message: message.into(),
            count: hazard_reports.len(),
            hazard_reports,
        }
    }
}
