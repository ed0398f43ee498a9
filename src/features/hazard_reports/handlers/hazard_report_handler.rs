use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppMultipart};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::hazard_reports::dtos::{
    CreateHazardReportForm, HazardReportFoundResponse, HazardReportListResponse,
    HazardReportPayload, HazardReportResponse, UploadedImage,
};
use crate::features::hazard_reports::services::HazardReportService;
use crate::shared::types::MessageResponse;
use crate::shared::validation::parse_object_id;

const INVALID_REPORT_ID: &str = "Invalid hazard report ID format";
const INVALID_USER_ID: &str = "Invalid User ID format";

/// Read text fields and image parts of a create request
///
/// Image parts are named `images` (repeatable); unknown fields are ignored.
async fn read_hazard_report_form(
    mut multipart: Multipart,
) -> Result<(HazardReportPayload, Vec<UploadedImage>)> {
    let mut payload = HazardReportPayload::default();
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "images" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let original_filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                images.push(UploadedImage::new(
                    original_filename,
                    content_type,
                    data.to_vec(),
                )?);
            }
            "reportType" | "description" | "status" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e))
                })?;
                match field_name.as_str() {
                    "reportType" => payload.report_type = Some(text),
                    "description" => payload.description = Some(text),
                    _ => payload.status = Some(text),
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    Ok((payload, images))
}

/// Create a hazard report
///
/// Accepts multipart/form-data with `reportType`, `description`, `status`
/// and any number of `images` file parts. The report is owned by the caller.
#[utoipa::path(
    post,
    path = "/api/hazard-reports",
    tag = "hazard-reports",
    request_body(
        content = CreateHazardReportForm,
        content_type = "multipart/form-data",
        description = "Hazard report fields with optional image files"
    ),
    responses(
        (status = 201, description = "Hazard report created", body = HazardReportResponse),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_hazard_report(
    user: Option<AuthenticatedUser>,
    State(service): State<Arc<HazardReportService>>,
    AppMultipart(multipart): AppMultipart,
) -> Result<(StatusCode, Json<HazardReportResponse>)> {
    let (payload, images) = read_hazard_report_form(multipart).await?;
    let filenames = images.iter().map(|i| i.filename.clone()).collect();
    let data = payload.into_create(filenames)?;

    let user = user.ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;
    let user_id = parse_object_id(&user.id, INVALID_USER_ID)?;

    let report = service.create(user_id, data, images).await?;

    Ok((
        StatusCode::CREATED,
        Json(HazardReportResponse {
            message: "Hazard Report created successfully".to_string(),
            hazard_report: report.into(),
        }),
    ))
}

/// List every hazard report
#[utoipa::path(
    get,
    path = "/api/hazard-reports",
    tag = "hazard-reports",
    responses(
        (status = 200, description = "All hazard reports", body = HazardReportListResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_all_hazard_reports(
    State(service): State<Arc<HazardReportService>>,
) -> Result<Json<HazardReportListResponse>> {
    let reports = service.list_all().await?;
    Ok(Json(HazardReportListResponse::new(
        "All Hazard Reports retrieved successfully",
        reports,
    )))
}

#[utoipa::path(
    get,
    path = "/api/hazard-reports/{id}",
    tag = "hazard-reports",
    params(
        ("id" = String, Path, description = "Hazard report ID")
    ),
    responses(
        (status = 200, description = "Hazard report found", body = HazardReportFoundResponse),
        (status = 400, description = "Invalid ID format", body = MessageResponse),
        (status = 404, description = "Hazard report not found", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_hazard_report_by_id(
    State(service): State<Arc<HazardReportService>>,
    Path(id): Path<String>,
) -> Result<Json<HazardReportFoundResponse>> {
    let id = parse_object_id(&id, INVALID_REPORT_ID)?;
    let report = service.get_by_id(id).await?;

    Ok(Json(HazardReportFoundResponse {
        message: "Hazard Report found".to_string(),
        hazardreport: report.into(),
    }))
}

/// Update a hazard report
///
/// `reportType`, `description` and `status` are required; `images` replaces
/// the stored list when present.
#[utoipa::path(
    put,
    path = "/api/hazard-reports/{id}",
    tag = "hazard-reports",
    params(
        ("id" = String, Path, description = "Hazard report ID")
    ),
    request_body = HazardReportPayload,
    responses(
        (status = 200, description = "Hazard report updated", body = HazardReportResponse),
        (status = 400, description = "Validation error or invalid ID format", body = MessageResponse),
        (status = 404, description = "Hazard report not found", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_hazard_report(
    State(service): State<Arc<HazardReportService>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<HazardReportPayload>,
) -> Result<Json<HazardReportResponse>> {
    let data = payload.into_update().inspect_err(|e| {
        debug!("Hazard report update rejected: {}", e);
    })?;
    let id = parse_object_id(&id, INVALID_REPORT_ID)?;

    let report = service.update(id, &data).await?;

    Ok(Json(HazardReportResponse {
        message: "Hazard Report updated successfully".to_string(),
        hazard_report: report.into(),
    }))
}

/// List the caller's hazard reports
#[utoipa::path(
    get,
    path = "/api/hazard-reports/user",
    tag = "hazard-reports",
    responses(
        (status = 200, description = "Caller's hazard reports", body = HazardReportListResponse),
        (status = 400, description = "Invalid user ID format", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_hazard_count(
    user: Option<AuthenticatedUser>,
    State(service): State<Arc<HazardReportService>>,
) -> Result<Json<HazardReportListResponse>> {
    let user = user.ok_or_else(|| {
        AppError::Unauthorized("Unauthorized: User ID is missing in JWT".to_string())
    })?;
    let user_id = parse_object_id(&user.id, INVALID_USER_ID)?;

    let reports = service.list_by_user(user_id).await?;

    Ok(Json(HazardReportListResponse::new(
        "User Hazard Reports retrieved successfully",
        reports,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/hazard-reports/{id}",
    tag = "hazard-reports",
    params(
        ("id" = String, Path, description = "Hazard report ID")
    ),
    responses(
        (status = 200, description = "Hazard report deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID format", body = MessageResponse),
        (status = 404, description = "Hazard report not found", body = MessageResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_hazard_report(
    State(service): State<Arc<HazardReportService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_object_id(&id, INVALID_REPORT_ID)?;
    service.delete(id).await?;

    Ok(Json(MessageResponse::new(
        "Hazard Report deleted successfully",
    )))
}

/// `user` is a reserved segment, never a report id
pub async fn update_hazard_report_at_user_path(
    AppJson(payload): AppJson<HazardReportPayload>,
) -> Result<Json<HazardReportResponse>> {
    payload.into_update()?;
    Err(AppError::BadRequest(INVALID_REPORT_ID.to_string()))
}

pub async fn delete_hazard_report_at_user_path() -> Result<Json<MessageResponse>> {
    Err(AppError::BadRequest(INVALID_REPORT_ID.to_string()))
}
