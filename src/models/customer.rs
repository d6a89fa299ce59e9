//! Customer model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::AppError;
use crate::validation::{
    validate_birth_date, validate_email_address, validate_phone_number,
};

/// Customer roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Manager => "manager",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "manager" => Ok(Role::Manager),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Role::User)
    }
}

// SQLx conversion for Role (stored as text)
impl sqlx::Type<Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        Ok(s.parse().unwrap_or(Role::User))
    }
}

impl Encode<'_, Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Full customer model from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Derived from `birth_date`; refreshed on every registry listing
    pub age: Option<i32>,
    pub birth_date: NaiveDate,
    pub city: String,
    pub email: String,
    pub phone_number: String,
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub active: bool,
}

/// Customer as rendered in the staff registry table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
    pub city: String,
    pub email: String,
    pub phone_number: String,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        CustomerView {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            age: customer.age,
            city: customer.city,
            email: customer.email,
            phone_number: customer.phone_number,
        }
    }
}

/// Search result row (`/findCustomer`): includes account fields
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSearchView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
    pub city: String,
    pub email: String,
    pub phone_number: String,
    pub username: String,
    pub role: Role,
}

impl From<Customer> for CustomerSearchView {
    fn from(customer: Customer) -> Self {
        CustomerSearchView {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            age: customer.age,
            city: customer.city,
            email: customer.email,
            phone_number: customer.phone_number,
            username: customer.username,
            role: customer.role,
        }
    }
}

/// Pre-filled edit form data (`/customerToUpdate`)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFormView {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub city: String,
    pub email: String,
    pub phone_number: String,
    pub username: String,
    pub role: Role,
}

impl From<Customer> for CustomerFormView {
    fn from(customer: Customer) -> Self {
        CustomerFormView {
            first_name: customer.first_name,
            last_name: customer.last_name,
            birth_date: customer.birth_date,
            city: customer.city,
            email: customer.email,
            phone_number: customer.phone_number,
            username: customer.username,
            role: customer.role,
        }
    }
}

/// Create customer request (staff form and self-registration)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    #[validate(length(min = 3, message = "First name must be at least 3 characters long."))]
    pub first_name: String,
    #[validate(length(min = 3, message = "Last name must be at least 3 characters long."))]
    pub last_name: String,
    /// `YYYY-MM-DD`; the derived age must land in 5..=120
    #[validate(custom(function = validate_birth_date))]
    pub birth_date: String,
    #[validate(length(min = 2, message = "City must be at least 2 characters long."))]
    pub city: String,
    #[validate(custom(function = validate_email_address))]
    pub email: String,
    #[validate(custom(function = validate_phone_number))]
    pub phone_number: String,
    #[validate(length(min = 3, message = "Username must be at least 3 characters long."))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long."))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Partial customer update, keyed by body `id`
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    pub id: i32,
    #[validate(length(min = 3, message = "First name must be at least 3 characters long."))]
    pub first_name: Option<String>,
    #[validate(length(min = 3, message = "Last name must be at least 3 characters long."))]
    pub last_name: Option<String>,
    #[validate(custom(function = validate_birth_date))]
    pub birth_date: Option<String>,
    #[validate(length(min = 2, message = "City must be at least 2 characters long."))]
    pub city: Option<String>,
    #[validate(custom(function = validate_email_address))]
    pub email: Option<String>,
    #[validate(custom(function = validate_phone_number))]
    pub phone_number: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Customer search parameters (`/findCustomer`)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub username: Option<String>,
    pub id: Option<i32>,
    /// Exact match, unlike the substring filters above
    pub role: Option<Role>,
}

/// JWT claims for authenticated customers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerClaims {
    pub sub: String,
    pub customer_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl CustomerClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }

    /// Require the manager role
    pub fn require_manager(&self) -> Result<(), AppError> {
        if self.is_manager() {
            Ok(())
        } else {
            Err(AppError::Authorization("Access denied".to_string()))
        }
    }

    /// Require the plain user role
    pub fn require_user(&self) -> Result<(), AppError> {
        if self.role == Role::User {
            Ok(())
        } else {
            Err(AppError::Authorization("Access denied".to_string()))
        }
    }
}
