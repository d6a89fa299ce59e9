//! Loan ledger endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::loan::{LateLoanView, LoanView},
};

use super::{IdPayload, MessageResponse};

/// List open loans
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    responses(
        (status = 200, description = "Open loans", body = Vec<LoanView>)
    )
)]
pub async fn list_loans(State(state): State<crate::AppState>) -> AppResult<Json<Vec<LoanView>>> {
    let loans = state.services.loans.list_loans().await?;
    Ok(Json(loans.into_iter().map(LoanView::from).collect()))
}

/// List overdue loans with their lateness in days
#[utoipa::path(
    get,
    path = "/lateLoans",
    tag = "loans",
    responses(
        (status = 200, description = "Overdue loans", body = Vec<LateLoanView>)
    )
)]
pub async fn list_late_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<LateLoanView>>> {
    let loans = state.services.loans.list_late_loans().await?;
    Ok(Json(loans.into_iter().map(LateLoanView::from).collect()))
}

/// Return a borrowed book
#[utoipa::path(
    delete,
    path = "/loans",
    tag = "loans",
    request_body = IdPayload,
    responses(
        (status = 200, description = "Loan closed", body = MessageResponse),
        (status = 404, description = "Loan not found"),
        (status = 409, description = "Loan already returned")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Json(payload): Json<IdPayload>,
) -> AppResult<Json<MessageResponse>> {
    state.services.loans.return_loan(payload.id).await?;

    Ok(Json(MessageResponse::new("Loan deleted successfully")))
}
