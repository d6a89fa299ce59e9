//! Shared validation rules for customer and book input.
//!
//! The rules are enforced server-side; the staff UI repeats some of them
//! client-side but the server is authoritative.

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").unwrap());

pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s\-+()]{10,15}$").unwrap());

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(error("email", "Please provide a valid email address."))
    }
}

pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(error(
            "phone",
            "Phone number must be between 10 and 15 characters and include digits, spaces, '-', '+', or '()'.",
        ))
    }
}

/// Publish year must be a 4-digit-style numeric string in 1000..=current year.
pub fn validate_publish_year(year: &str) -> Result<(), ValidationError> {
    let current_year = Utc::now().year();
    match year.parse::<i32>() {
        Ok(y) if (1000..=current_year).contains(&y) => Ok(()),
        _ => Err(error(
            "publish_year",
            "Publish Year must be a valid year between 1000 and the current year.",
        )),
    }
}

pub fn validate_birth_date(birth_date: &str) -> Result<(), ValidationError> {
    if !DATE_RE.is_match(birth_date) {
        return Err(error(
            "birth_date",
            "Birthdate must be in the format YYYY-MM-DD.",
        ));
    }
    let parsed = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
        .map_err(|_| error("birth_date", "Birthdate must be in the format YYYY-MM-DD."))?;

    let age = age_on(parsed, Utc::now().date_naive());
    if !(5..=120).contains(&age) {
        return Err(error("birth_date", "Age must be between 5 and 120."));
    }
    Ok(())
}

/// Password rule for self-registration: at least 8 characters, one uppercase
/// letter, one digit and one special character, drawn only from the allowed
/// alphabet `[A-Za-z0-9@$!%*?&]`.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    const SPECIALS: &str = "@$!%*?&";

    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c));
    let strong = password.len() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIALS.contains(c));

    if allowed && strong {
        Ok(())
    } else {
        Err(error(
            "password",
            "Password must be at least 8 characters long and contain one uppercase letter, one number, and one special character.",
        ))
    }
}

/// Completed years between `birth` and `today`
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Flatten a `validator` error set into the first human-readable message,
/// which is what the UI displays.
pub fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_rule_matches_stated_literals() {
        assert!(validate_password_strength("abc").is_err());
        assert!(validate_password_strength("Abcdef1!").is_ok());
    }

    #[test]
    fn password_accepts_all_special_chars() {
        for special in "@$!%*?&".chars() {
            let candidate = format!("Abcdef1{}", special);
            assert!(
                validate_password_strength(&candidate).is_ok(),
                "rejected {}",
                candidate
            );
        }
    }

    #[test]
    fn password_rejects_missing_classes() {
        assert!(validate_password_strength("abcdefg1@").is_err()); // no uppercase
        assert!(validate_password_strength("Abcdefgh@").is_err()); // no digit
        assert!(validate_password_strength("Abcdefg1").is_err()); // no special
        assert!(validate_password_strength("Ab1@").is_err()); // too short
        assert!(validate_password_strength("Abcdef1@ ").is_err()); // space not allowed
    }

    #[test]
    fn phone_rule() {
        assert!(validate_phone_number("052-1234567").is_ok());
        assert!(validate_phone_number("+972 (52) 123").is_ok());
        assert!(validate_phone_number("12345").is_err()); // too short
        assert!(validate_phone_number("1234567890123456").is_err()); // too long
        assert!(validate_phone_number("05a-1234567").is_err()); // letters
    }

    #[test]
    fn email_rule() {
        assert!(validate_email_address("staff@library.org").is_ok());
        assert!(validate_email_address("first.last+tag@a-b.co.il").is_ok());
        assert!(validate_email_address("not-an-email").is_err());
        assert!(validate_email_address("a b@library.org").is_err());
    }

    #[test]
    fn publish_year_bounds() {
        assert!(validate_publish_year("1000").is_ok());
        assert!(validate_publish_year("1999").is_ok());
        assert!(validate_publish_year("999").is_err());
        assert!(validate_publish_year("3000").is_err());
        assert!(validate_publish_year("abcd").is_err());
    }

    #[test]
    fn age_counts_completed_years_only() {
        let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
        let before_birthday = NaiveDate::from_ymd_opt(2026, 6, 14).unwrap();
        let on_birthday = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        assert_eq!(age_on(birth, before_birthday), 25);
        assert_eq!(age_on(birth, on_birthday), 26);
    }

    #[test]
    fn birth_date_requires_iso_format() {
        assert!(validate_birth_date("15-06-2000").is_err());
        assert!(validate_birth_date("2000-13-40").is_err());
        assert!(validate_birth_date("2000-06-15").is_ok());
    }
}
