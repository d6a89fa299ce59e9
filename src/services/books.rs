//! Book catalog service

use chrono::{Duration, NaiveDate, Utc};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook},
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Active catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_active().await
    }

    /// Filtered catalog search
    pub async fn find_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.find(query).await
    }

    /// Validate and create a book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<i32> {
        book.validate()
            .map_err(|e| AppError::Validation(validation::first_message(&e)))?;

        let id = self.repository.books.create(&book).await?;
        tracing::info!(book_id = id, name = %book.name, "book created");
        Ok(id)
    }

    /// Soft-delete a book
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }

    /// Borrow a book: the loan period comes from the book's loan type.
    /// Returns the loan id and the expected return date.
    pub async fn borrow_book(&self, book_id: i32, cust_id: i32) -> AppResult<(i32, NaiveDate)> {
        let book = self.repository.books.get_by_id(book_id).await?;

        if book.is_loaned {
            return Err(AppError::Conflict(
                "This book is already loaned.".to_string(),
            ));
        }

        // Verify the borrower exists before touching the ledger
        self.repository.customers.get_by_id(cust_id).await?;

        let period = self
            .repository
            .loans
            .get_period(book.book_loan_type)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid loan type".to_string()))?;

        let loan_date = Utc::now().date_naive();
        let expected_return_date = loan_date + Duration::days(period.num_of_days as i64);

        let loan_id = self
            .repository
            .loans
            .create(cust_id, book_id, loan_date, expected_return_date)
            .await?;
        self.repository.books.set_loaned(book_id, true).await?;

        tracing::info!(loan_id, book_id, cust_id, %expected_return_date, "book borrowed");
        Ok((loan_id, expected_return_date))
    }
}
