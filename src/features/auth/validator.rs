use super::model::AuthenticatedUser;
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Verifies HS256 session tokens issued by the login service
pub struct JwtValidator {
    decoding_key: DecodingKey,
    leeway: u64,
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: u64,
}

impl SessionClaims {
    /// Caller identity, if the token names one
    pub fn into_user(self) -> Option<AuthenticatedUser> {
        let id = self.id.filter(|id| !id.trim().is_empty())?;
        Some(AuthenticatedUser {
            id,
            email: self.email,
            role: self.role,
        })
    }
}

impl JwtValidator {
    pub fn new(secret: &str, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Rejected session token: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })?;

        Ok(token_data.claims)
    }
}
