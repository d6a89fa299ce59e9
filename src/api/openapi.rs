//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, customers, health, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblion API",
        version = "0.3.0",
        description = "Library Loan Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::hello,
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        auth::manager_dashboard,
        auth::user_dashboard,
        auth::my_loaned_books,
        // Books
        books::list_books,
        books::find_books,
        books::create_book,
        books::borrow_book,
        books::delete_book,
        books::guest_watch_list,
        // Customers
        customers::list_customers,
        customers::find_customers,
        customers::customer_to_update,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        // Loans
        loans::list_loans,
        loans::list_late_loans,
        loans::return_loan,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Books
            crate::models::book::BookView,
            crate::models::book::GuestBookView,
            crate::models::book::CreateBook,
            crate::models::book::BookQuery,
            books::BorrowRequest,
            // Customers
            crate::models::customer::CustomerView,
            crate::models::customer::CustomerSearchView,
            crate::models::customer::CustomerFormView,
            crate::models::customer::CreateCustomer,
            crate::models::customer::UpdateCustomer,
            crate::models::customer::CustomerQuery,
            crate::models::customer::Role,
            customers::CustomerIdQuery,
            // Loans
            crate::models::loan::LoanView,
            crate::models::loan::LateLoanView,
            crate::models::loan::MemberLoanView,
            crate::models::loan::LoanPeriod,
            // Shared
            crate::api::IdPayload,
            crate::api::MessageResponse,
            crate::api::CreatedResponse,
            // Health
            health::HelloResponse,
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication and member endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "customers", description = "Customer registry management"),
        (name = "loans", description = "Loan ledger")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
