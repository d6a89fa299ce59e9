//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// All active (non-deleted) books
    pub async fn list_active(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE active = TRUE ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Search books. Searches the whole table, deleted rows included; the
    /// list endpoint is the one that filters on `active`.
    pub async fn find(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref name) = query.name {
            params.push(format!("%{}%", name));
            conditions.push(format!("name ILIKE ${}", params.len()));
        }
        if let Some(ref author) = query.author {
            params.push(format!("%{}%", author));
            conditions.push(format!("author ILIKE ${}", params.len()));
        }
        if let Some(ref publish_year) = query.publish_year {
            params.push(publish_year.clone());
            conditions.push(format!("publish_year = ${}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!("SELECT * FROM books {} ORDER BY id", where_clause);

        let mut builder = sqlx::query_as::<_, Book>(&select_query);
        for param in &params {
            builder = builder.bind(param);
        }
        let books = builder.fetch_all(&self.pool).await?;

        Ok(books)
    }

    /// Create a new book; new books start unloaned
    pub async fn create(&self, book: &CreateBook) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (name, author, publish_year, book_loan_type, is_loaned, active)
            VALUES ($1, $2, $3, $4, FALSE, TRUE)
            RETURNING id
            "#,
        )
        .bind(&book.name)
        .bind(&book.author)
        .bind(&book.publish_year)
        .bind(book.book_loan_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Soft-delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE books SET active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Flip the loan flag
    pub async fn set_loaned(&self, id: i32, is_loaned: bool) -> AppResult<()> {
        sqlx::query("UPDATE books SET is_loaned = $1 WHERE id = $2")
            .bind(is_loaned)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
