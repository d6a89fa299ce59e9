//! Book (catalog) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validation::validate_publish_year;

/// Book row from database
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author: String,
    /// Kept as a 4-character string on the wire and in storage
    pub publish_year: String,
    pub book_loan_type: i16,
    pub is_loaned: bool,
    pub active: bool,
}

/// Book as rendered in the staff catalog table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub publish_year: String,
    pub book_loan_type: i16,
    pub is_loaned: bool,
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        BookView {
            id: book.id,
            name: book.name,
            author: book.author,
            publish_year: book.publish_year,
            book_loan_type: book.book_loan_type,
            is_loaned: book.is_loaned,
        }
    }
}

/// Public catalog view for unauthenticated visitors: no ids, no loan type
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestBookView {
    pub name: String,
    pub author: String,
    pub publish_year: String,
    pub is_loaned: bool,
}

impl From<Book> for GuestBookView {
    fn from(book: Book) -> Self {
        GuestBookView {
            name: book.name,
            author: book.author,
            publish_year: book.publish_year,
            is_loaned: book.is_loaned,
        }
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Book Name should be between 3 to 100 characters."
    ))]
    pub name: String,
    #[validate(length(
        min = 3,
        max = 100,
        message = "Author Name should be between 3 to 100 characters."
    ))]
    pub author: String,
    #[validate(custom(function = validate_publish_year))]
    pub publish_year: String,
    #[validate(range(
        min = 1,
        max = 3,
        message = "Loan Type must be a positive number between 1 and 3."
    ))]
    pub book_loan_type: i16,
}

/// Book search parameters (`/findBook`)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    /// Case-insensitive substring match on the title
    pub name: Option<String>,
    /// Case-insensitive substring match on the author
    pub author: Option<String>,
    /// Exact publish year
    pub publish_year: Option<String>,
}
