use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::hazard_reports::{dtos as hazard_dtos, handlers as hazard_handlers};
use crate::shared::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        hazard_handlers::create_hazard_report,
        hazard_handlers::get_all_hazard_reports,
        hazard_handlers::get_user_hazard_count,
        hazard_handlers::get_hazard_report_by_id,
        hazard_handlers::update_hazard_report,
        hazard_handlers::delete_hazard_report,
    ),
    components(
        schemas(
            MessageResponse,
            hazard_dtos::HazardReportPayload,
            hazard_dtos::CreateHazardReportForm,
            hazard_dtos::HazardReportDto,
            hazard_dtos::HazardReportResponse,
            hazard_dtos::HazardReportFoundResponse,
            hazard_dtos::HazardReportListResponse,
        )
    ),
    tags(
        (name = "hazard-reports", description = "Hazard reports filed by users"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Hazard Report API",
        version = "0.1.0",
        description = "API documentation for hazard reporting",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
