use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller identity taken from a verified session token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Raw `id` claim; not yet checked for identifier format
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
