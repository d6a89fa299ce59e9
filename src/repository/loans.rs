//! Loans repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, LoanPeriod, MemberLoanView},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// All open loans
    pub async fn list_active(&self) -> AppResult<Vec<Loan>> {
        let loans =
            sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE active = TRUE ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(loans)
    }

    /// Open loans already flagged late
    pub async fn list_late(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE active = TRUE AND is_late = TRUE ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Create a new loan
    pub async fn create(
        &self,
        cust_id: i32,
        book_id: i32,
        loan_date: NaiveDate,
        expected_return_date: NaiveDate,
    ) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO loans (
                cust_id, book_id, loan_date, expected_return_date,
                return_date, late_days_num, is_late, active
            ) VALUES ($1, $2, $3, $4, NULL, 0, FALSE, TRUE)
            RETURNING id
            "#,
        )
        .bind(cust_id)
        .bind(book_id)
        .bind(loan_date)
        .bind(expected_return_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Close a loan on return, recording lateness
    pub async fn close(
        &self,
        id: i32,
        return_date: NaiveDate,
        is_late: bool,
        late_days_num: i32,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE loans
            SET active = FALSE, return_date = $1, is_late = $2, late_days_num = $3
            WHERE id = $4
            "#,
        )
        .bind(return_date)
        .bind(is_late)
        .bind(late_days_num)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Refresh the late flags of open loans against the given date.
    /// Keeps the late-loans view current without waiting for a return.
    pub async fn mark_overdue(&self, today: NaiveDate) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE loans
            SET is_late = TRUE, late_days_num = $1 - expected_return_date
            WHERE active = TRUE AND is_late = FALSE AND expected_return_date < $1
            "#,
        )
        .bind(today)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// A customer's full loan history joined with book details
    pub async fn member_loans(&self, cust_id: i32) -> AppResult<Vec<MemberLoanView>> {
        let loans = sqlx::query_as::<_, MemberLoanView>(
            r#"
            SELECT b.name as book_name, b.author, b.publish_year, l.is_late
            FROM loans l
            JOIN books b ON l.book_id = b.id
            WHERE l.cust_id = $1
            ORDER BY l.id
            "#,
        )
        .bind(cust_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Loan period for a book loan type
    pub async fn get_period(&self, loan_type: i16) -> AppResult<Option<LoanPeriod>> {
        let period = sqlx::query_as::<_, LoanPeriod>(
            "SELECT loan_type, num_of_days FROM loan_periods WHERE loan_type = $1",
        )
        .bind(loan_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(period)
    }
}
