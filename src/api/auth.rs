//! Authentication and member endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{customer::CreateCustomer, loan::MemberLoanView, Role},
};

use super::{AuthenticatedCustomer, CreatedResponse, MessageResponse};

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: Role,
    pub message: String,
}

/// Self-registration for new members.
///
/// Same rules as the staff create form plus the password strength
/// requirement.
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Account created", body = CreatedResponse),
        (status = 400, description = "Invalid input or duplicate username/email/phone")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(customer): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    state.services.customers.register(customer).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Customer created successfully")),
    ))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, customer) = state
        .services
        .auth
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        access_token: token,
        role: customer.role,
        message: "Login successful".to_string(),
    }))
}

/// Manager dashboard gate
#[utoipa::path(
    get,
    path = "/manager",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Access granted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not a manager")
    )
)]
pub async fn manager_dashboard(
    AuthenticatedCustomer(claims): AuthenticatedCustomer,
) -> AppResult<Json<MessageResponse>> {
    claims.require_manager()?;

    Ok(Json(MessageResponse::new("Welcome to the Manager Dashboard")))
}

/// Member dashboard gate
#[utoipa::path(
    get,
    path = "/user",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Access granted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not a plain user")
    )
)]
pub async fn user_dashboard(
    AuthenticatedCustomer(claims): AuthenticatedCustomer,
) -> AppResult<Json<MessageResponse>> {
    claims.require_user()?;

    Ok(Json(MessageResponse::new("Welcome to the User Dashboard")))
}

/// The caller's own loans, joined with book details
#[utoipa::path(
    get,
    path = "/findCustomersBooks",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's loans", body = Vec<MemberLoanView>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_loaned_books(
    State(state): State<crate::AppState>,
    AuthenticatedCustomer(claims): AuthenticatedCustomer,
) -> AppResult<Json<Vec<MemberLoanView>>> {
    let loans = state.services.loans.member_loans(claims.customer_id).await?;
    Ok(Json(loans))
}
