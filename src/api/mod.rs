//! API handlers for the Biblion REST endpoints

pub mod auth;
pub mod books;
pub mod customers;
pub mod health;
pub mod loans;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppError, models::customer::CustomerClaims, AppState};

/// JSON body carrying only a target id; the staff UI addresses deletes
/// and returns this way rather than through the path
#[derive(Debug, Deserialize, ToSchema)]
pub struct IdPayload {
    pub id: i32,
}

/// Plain confirmation body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Creation confirmation body
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub status: u16,
    pub message: String,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: 201,
            message: message.into(),
        }
    }
}

/// Extractor for the authenticated customer from a JWT bearer token
pub struct AuthenticatedCustomer(pub CustomerClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedCustomer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = CustomerClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedCustomer(claims))
    }
}
