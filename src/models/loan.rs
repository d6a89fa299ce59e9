//! Loan (borrow) model and related types

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan row from database
#[derive(Debug, Clone, FromRow)]
pub struct Loan {
    pub id: i32,
    pub cust_id: i32,
    pub book_id: i32,
    pub loan_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub late_days_num: i32,
    pub is_late: bool,
    pub active: bool,
}

/// Active loan as rendered in the loans table.
///
/// The `expected_returnDate` key is not camelCase; it is the wire name the
/// staff UI reads and must stay verbatim.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanView {
    pub id: i32,
    #[serde(rename = "custId")]
    pub cust_id: i32,
    #[serde(rename = "bookId")]
    pub book_id: i32,
    #[serde(rename = "loanDate")]
    pub loan_date: NaiveDate,
    #[serde(rename = "expected_returnDate")]
    pub expected_return_date: NaiveDate,
}

impl From<Loan> for LoanView {
    fn from(loan: Loan) -> Self {
        LoanView {
            id: loan.id,
            cust_id: loan.cust_id,
            book_id: loan.book_id,
            loan_date: loan.loan_date,
            expected_return_date: loan.expected_return_date,
        }
    }
}

/// Late loan as rendered in the late-loans table.
///
/// Unlike [`LoanView`] the customer key here is `customerId`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LateLoanView {
    pub id: i32,
    #[serde(rename = "customerId")]
    pub customer_id: i32,
    #[serde(rename = "bookId")]
    pub book_id: i32,
    #[serde(rename = "loanDate")]
    pub loan_date: NaiveDate,
    #[serde(rename = "expected_returnDate")]
    pub expected_return_date: NaiveDate,
    #[serde(rename = "lateDays_num")]
    pub late_days_num: i32,
}

impl From<Loan> for LateLoanView {
    fn from(loan: Loan) -> Self {
        LateLoanView {
            id: loan.id,
            customer_id: loan.cust_id,
            book_id: loan.book_id,
            loan_date: loan.loan_date,
            expected_return_date: loan.expected_return_date,
            late_days_num: loan.late_days_num,
        }
    }
}

/// A member's own loan, joined with the book (`/findCustomersBooks`)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MemberLoanView {
    pub book_name: String,
    pub author: String,
    pub publish_year: String,
    #[serde(rename = "isLate")]
    pub is_late: bool,
}

/// Loan period settings keyed by book loan type
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LoanPeriod {
    pub loan_type: i16,
    pub num_of_days: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_loan() -> Loan {
        Loan {
            id: 4,
            cust_id: 9,
            book_id: 17,
            loan_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            expected_return_date: NaiveDate::from_ymd_opt(2026, 7, 11).unwrap(),
            return_date: None,
            late_days_num: 6,
            is_late: true,
            active: true,
        }
    }

    #[test]
    fn loan_view_uses_contract_keys() {
        let json = serde_json::to_value(LoanView::from(sample_loan())).unwrap();
        assert_eq!(json["custId"], 9);
        assert_eq!(json["bookId"], 17);
        assert_eq!(json["loanDate"], "2026-07-01");
        assert_eq!(json["expected_returnDate"], "2026-07-11");
    }

    #[test]
    fn late_loan_view_uses_customer_id_key() {
        let json = serde_json::to_value(LateLoanView::from(sample_loan())).unwrap();
        assert_eq!(json["customerId"], 9);
        assert!(json.get("custId").is_none());
        assert_eq!(json["lateDays_num"], 6);
    }
}
