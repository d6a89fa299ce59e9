//! Loan ledger service

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, MemberLoanView},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All open loans
    pub async fn list_loans(&self) -> AppResult<Vec<Loan>> {
        self.repository.loans.list_active().await
    }

    /// Open loans past their expected return date. Flags are refreshed
    /// against today first, so a loan shows up here as soon as it is
    /// overdue rather than only after it is returned.
    pub async fn list_late_loans(&self) -> AppResult<Vec<Loan>> {
        let today = Utc::now().date_naive();
        let flagged = self.repository.loans.mark_overdue(today).await?;
        if flagged > 0 {
            tracing::info!(flagged, "marked loans overdue");
        }
        self.repository.loans.list_late().await
    }

    /// Return a borrowed book: close the loan, record lateness and free
    /// the book.
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<Loan> {
        let loan = self.repository.loans.get_by_id(loan_id).await?;

        if !loan.active {
            return Err(AppError::Conflict("Loan already returned".to_string()));
        }

        let today = Utc::now().date_naive();
        let (is_late, late_days) = lateness(loan.expected_return_date, today);

        self.repository
            .loans
            .close(loan_id, today, is_late, late_days)
            .await?;
        self.repository.books.set_loaned(loan.book_id, false).await?;

        tracing::info!(loan_id, is_late, late_days, "loan returned");
        self.repository.loans.get_by_id(loan_id).await
    }

    /// A member's own loan history with book details
    pub async fn member_loans(&self, cust_id: i32) -> AppResult<Vec<MemberLoanView>> {
        self.repository.loans.member_loans(cust_id).await
    }
}

/// Days late for a return happening on `today`; zero when on time
fn lateness(expected_return_date: NaiveDate, today: NaiveDate) -> (bool, i32) {
    if today > expected_return_date {
        (true, (today - expected_return_date).num_days() as i32)
    } else {
        (false, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_time_return_is_not_late() {
        let expected = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        assert_eq!(lateness(expected, expected), (false, 0));
        assert_eq!(
            lateness(expected, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()),
            (false, 0)
        );
    }

    #[test]
    fn late_return_counts_days_past_due() {
        let expected = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        let returned = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();
        assert_eq!(lateness(expected, returned), (true, 7));
    }
}
