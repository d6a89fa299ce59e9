//! Book catalog endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{BookQuery, BookView, CreateBook, GuestBookView},
};

use super::{CreatedResponse, IdPayload, MessageResponse};

/// Borrow request (`PUT /books`).
///
/// `custId` may arrive as a JSON string: the staff UI forwards the raw
/// prompt input without converting it to a number.
#[serde_as]
#[derive(Debug, Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Book ID
    pub id: i32,
    /// Borrower's customer ID
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(rename = "custId")]
    pub cust_id: i32,
}

/// List active books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Active catalog", body = Vec<BookView>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<BookView>>> {
    let books = state.services.books.list_books().await?;
    Ok(Json(books.into_iter().map(BookView::from).collect()))
}

/// Search books by name, author and publish year
#[utoipa::path(
    get,
    path = "/findBook",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookView>)
    )
)]
pub async fn find_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<BookView>>> {
    let books = state.services.books.find_books(&query).await?;
    Ok(Json(books.into_iter().map(BookView::from).collect()))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = CreatedResponse),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    state.services.books.create_book(book).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Book created successfully")),
    ))
}

/// Borrow a book for a customer
#[utoipa::path(
    put,
    path = "/books",
    tag = "books",
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Loan created", body = MessageResponse),
        (status = 400, description = "Unknown loan type"),
        (status = 404, description = "Book or customer not found"),
        (status = 409, description = "Book is already loaned")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .books
        .borrow_book(request.id, request.cust_id)
        .await?;

    Ok(Json(MessageResponse::new("loan updated successfully")))
}

/// Remove a book from the catalog
#[utoipa::path(
    delete,
    path = "/books",
    tag = "books",
    request_body = IdPayload,
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<IdPayload>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete_book(payload.id).await?;

    Ok(Json(MessageResponse::new("Book deleted successfully")))
}

/// Public catalog for unauthenticated visitors
#[utoipa::path(
    get,
    path = "/guestWatchList",
    tag = "books",
    responses(
        (status = 200, description = "Active catalog without ids", body = Vec<GuestBookView>)
    )
)]
pub async fn guest_watch_list(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<GuestBookView>>> {
    let books = state.services.books.list_books().await?;
    Ok(Json(books.into_iter().map(GuestBookView::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrow_request_accepts_string_customer_id() {
        let request: BorrowRequest =
            serde_json::from_str(r#"{"id": 4, "custId": "12"}"#).unwrap();
        assert_eq!(request.id, 4);
        assert_eq!(request.cust_id, 12);
    }

    #[test]
    fn borrow_request_accepts_numeric_customer_id() {
        let request: BorrowRequest = serde_json::from_str(r#"{"id": 4, "custId": 12}"#).unwrap();
        assert_eq!(request.cust_id, 12);
    }

    #[test]
    fn borrow_request_rejects_non_numeric_customer_id() {
        assert!(serde_json::from_str::<BorrowRequest>(r#"{"id": 4, "custId": "abc"}"#).is_err());
    }
}
