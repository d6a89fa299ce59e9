//! Customer registry endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::customer::{
        CreateCustomer, CustomerFormView, CustomerQuery, CustomerSearchView, CustomerView,
        UpdateCustomer,
    },
};

use super::{CreatedResponse, IdPayload, MessageResponse};

/// Query string for `/customerToUpdate`
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CustomerIdQuery {
    pub id: i32,
}

/// List active customers with refreshed ages
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    responses(
        (status = 200, description = "Active registry", body = Vec<CustomerView>)
    )
)]
pub async fn list_customers(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<CustomerView>>> {
    let customers = state.services.customers.list_customers().await?;
    Ok(Json(customers.into_iter().map(CustomerView::from).collect()))
}

/// Search customers by any combination of registry fields
#[utoipa::path(
    get,
    path = "/findCustomer",
    tag = "customers",
    params(CustomerQuery),
    responses(
        (status = 200, description = "Matching customers", body = Vec<CustomerSearchView>)
    )
)]
pub async fn find_customers(
    State(state): State<crate::AppState>,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Json<Vec<CustomerSearchView>>> {
    let customers = state.services.customers.find_customers(&query).await?;
    Ok(Json(
        customers
            .into_iter()
            .map(CustomerSearchView::from)
            .collect(),
    ))
}

/// Fetch a single customer to pre-fill the edit form
#[utoipa::path(
    get,
    path = "/customerToUpdate",
    tag = "customers",
    params(CustomerIdQuery),
    responses(
        (status = 200, description = "Customer form data", body = CustomerFormView),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn customer_to_update(
    State(state): State<crate::AppState>,
    Query(query): Query<CustomerIdQuery>,
) -> AppResult<Json<CustomerFormView>> {
    let customer = state.services.customers.get_customer(query.id).await?;
    Ok(Json(CustomerFormView::from(customer)))
}

/// Add a customer to the registry
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = CreatedResponse),
        (status = 400, description = "Invalid input or duplicate username/email/phone")
    )
)]
pub async fn create_customer(
    State(state): State<crate::AppState>,
    Json(customer): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    state.services.customers.create_customer(customer).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Customer created successfully")),
    ))
}

/// Update a customer; only the provided fields change
#[utoipa::path(
    put,
    path = "/customers",
    tag = "customers",
    request_body = UpdateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = MessageResponse),
        (status = 400, description = "Invalid input or duplicate email/phone"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer(
    State(state): State<crate::AppState>,
    Json(update): Json<UpdateCustomer>,
) -> AppResult<Json<MessageResponse>> {
    state.services.customers.update_customer(update).await?;

    Ok(Json(MessageResponse::new("Customer updated successfully")))
}

/// Remove a customer from the registry
#[utoipa::path(
    delete,
    path = "/customers",
    tag = "customers",
    request_body = IdPayload,
    responses(
        (status = 200, description = "Customer deleted", body = MessageResponse),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn delete_customer(
    State(state): State<crate::AppState>,
    Json(payload): Json<IdPayload>,
) -> AppResult<Json<MessageResponse>> {
    state.services.customers.delete_customer(payload.id).await?;

    Ok(Json(MessageResponse::new("Customer deleted successfully")))
}
