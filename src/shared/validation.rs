use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

lazy_static! {
    /// Regex for record identifiers (canonical hyphenated UUID)
    /// - Valid: "0190c2a4-7b1e-7d3a-9f43-5c2e1b0a9d11", upper- or lower-case hex
    /// - Invalid: "123", "{0190c2a4-...}", "urn:uuid:...", simple 32-char form
    pub static ref OBJECT_ID_REGEX: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    )
    .unwrap();
}

/// Parse a well-formed record identifier, or fail with `BadRequest(message)`
pub fn parse_object_id(raw: &str, message: &str) -> Result<Uuid> {
    if !OBJECT_ID_REGEX.is_match(raw) {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(message.to_string()))
}
